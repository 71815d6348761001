#![allow(dead_code)]

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use taskdag::store::{Task, TaskId};

/// Parse a `YYYY-MM-DD` literal in tests.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date literal")
}

/// Builder for `Task` to simplify test setup.
///
/// `created_at` defaults to a fixed epoch offset by the id, so creation
/// order follows id order deterministically.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(id: TaskId, title: &str) -> Self {
        Self {
            task: Task {
                id,
                title: title.to_string(),
                due: date("2026-12-31"),
                created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
                    + Duration::seconds(id as i64),
                depends_on: BTreeSet::new(),
            },
        }
    }

    pub fn due(mut self, d: &str) -> Self {
        self.task.due = date(d);
        self
    }

    pub fn depends_on(mut self, dep: TaskId) -> Self {
        self.task.depends_on.insert(dep);
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for a full task snapshot.
pub struct SnapshotBuilder {
    tasks: Vec<Task>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn build(self) -> Vec<Task> {
        self.tasks
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The three-task pipeline from the scheduling docs:
/// 1 "Design" <- 2 "Build" <- 3 "Test".
pub fn design_build_test() -> Vec<Task> {
    SnapshotBuilder::new()
        .with_task(TaskBuilder::new(1, "Design").due("2026-09-01").build())
        .with_task(
            TaskBuilder::new(2, "Build")
                .due("2026-09-15")
                .depends_on(1)
                .build(),
        )
        .with_task(
            TaskBuilder::new(3, "Test")
                .due("2026-09-30")
                .depends_on(2)
                .build(),
        )
        .build()
}
