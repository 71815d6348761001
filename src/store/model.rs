// src/store/model.rs

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Canonical task id type used throughout the crate.
pub type TaskId = u64;

/// A task as persisted in the store file.
///
/// `depends_on` holds the ids of this task's prerequisites: tasks that must
/// logically finish before this one. It is a set (unique by id, order
/// irrelevant); `BTreeSet` also gives deterministic ascending iteration,
/// which the graph traversals rely on for reproducible output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub due: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub depends_on: BTreeSet<TaskId>,
}

/// Top-level store file as read from TOML, before validation.
///
/// ```toml
/// next_id = 4
///
/// [[task]]
/// id = 1
/// title = "Design"
/// due = "2026-09-01"
/// created_at = "2026-08-01T09:00:00Z"
/// depends_on = []
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStoreFile {
    /// Next id to hand out. Optional in the file; reconciled against the
    /// highest existing id on load.
    #[serde(default)]
    pub next_id: Option<TaskId>,

    #[serde(default, rename = "task")]
    pub tasks: Vec<Task>,
}

/// A store file that has passed structural validation (unique ids,
/// consistent id counter). Construct via `TryFrom<RawStoreFile>`.
#[derive(Debug, Clone)]
pub struct StoreFile {
    tasks: Vec<Task>,
    next_id: TaskId,
}

impl StoreFile {
    /// Used by the validation layer once the raw file has been checked.
    pub(crate) fn new_unchecked(tasks: Vec<Task>, next_id: TaskId) -> Self {
        Self { tasks, next_id }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }

    pub fn next_id(&self) -> TaskId {
        self.next_id
    }

    /// Hand out the next id and advance the counter.
    pub fn allocate_id(&mut self) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn to_raw(&self) -> RawStoreFile {
        RawStoreFile {
            next_id: Some(self.next_id),
            tasks: self.tasks.clone(),
        }
    }
}
