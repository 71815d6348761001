// src/store/mod.rs

//! File-backed task store.
//!
//! - [`model`] defines the persisted [`Task`] shape and the raw/checked
//!   store-file pair.
//! - [`loader`] reads and deserializes the TOML file.
//! - [`validate`] holds the raw-to-checked conversion plus the snapshot
//!   diagnostics (dangling references, acyclicity).
//!
//! The store owns referential integrity: deleting a task removes every edge
//! referencing it, and `save` refuses to persist a snapshot whose dependency
//! relation is cyclic. The graph engine itself never mutates anything.

pub mod loader;
pub mod model;
pub mod validate;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::errors::{Result, TaskdagError};

pub use model::{RawStoreFile, StoreFile, Task, TaskId};

/// A task collection bound to a file on disk.
///
/// Commands load the store, mutate it in memory, and call [`TaskStore::save`]
/// once; the process-per-command model serializes edge mutations, so a
/// validated toggle cannot race another writer within one invocation.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    file: StoreFile,
}

impl TaskStore {
    /// Open the store at `path`, treating a missing file as empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = loader::load_and_validate(&path)?;
        debug!(path = %path.display(), tasks = file.tasks().len(), "opened task store");
        Ok(Self { path, file })
    }

    /// The current snapshot. Engine operations take this as input.
    pub fn tasks(&self) -> &[Task] {
        self.file.tasks()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.file.tasks().iter().find(|t| t.id == id)
    }

    /// Create a task with a fresh id and an empty dependency set.
    ///
    /// Rejects titles that are empty after trimming; the due date is required
    /// by construction.
    pub fn create(&mut self, title: &str, due: NaiveDate) -> Result<TaskId> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskdagError::StoreError("title is required".to_string()));
        }

        let id = self.file.allocate_id();
        self.file.tasks_mut().push(Task {
            id,
            title: title.to_string(),
            due,
            created_at: Utc::now(),
            depends_on: BTreeSet::new(),
        });

        info!(id, title, "created task");
        Ok(id)
    }

    /// Delete a task and strip its id from every other task's dependency set.
    pub fn remove(&mut self, id: TaskId) -> Result<Task> {
        let tasks = self.file.tasks_mut();
        let pos = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskdagError::InvalidReference(id))?;
        let removed = tasks.remove(pos);

        for task in tasks.iter_mut() {
            if task.depends_on.remove(&id) {
                debug!(task = task.id, dep = id, "removed edge to deleted task");
            }
        }

        info!(id, title = %removed.title, "removed task");
        Ok(removed)
    }

    /// Replace a task's dependency set with a validated one.
    ///
    /// This is the commit half of a toggle: the caller runs
    /// [`crate::graph::toggle_dependency`] against the current snapshot and
    /// hands the updated edge set back here.
    pub fn set_dependencies(&mut self, id: TaskId, deps: BTreeSet<TaskId>) -> Result<()> {
        let task = self
            .file
            .tasks_mut()
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskdagError::InvalidReference(id))?;
        task.depends_on = deps;
        Ok(())
    }

    /// Persist the store to disk.
    ///
    /// Refuses to write a snapshot whose dependency relation is cyclic; the
    /// per-edge validation in the engine should make this unreachable, but
    /// the write boundary is where the invariant has to actually hold.
    pub fn save(&self) -> Result<()> {
        validate::ensure_acyclic(self.file.tasks())?;

        let raw = self.file.to_raw();
        let contents = toml::to_string_pretty(&raw)?;
        fs::write(&self.path, contents)?;

        debug!(path = %self.path.display(), "saved task store");
        Ok(())
    }
}
