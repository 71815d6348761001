// src/store/validate.rs

use std::collections::BTreeSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::warn;

use crate::errors::{Result, TaskdagError};
use crate::store::model::{RawStoreFile, StoreFile, Task, TaskId};

impl TryFrom<RawStoreFile> for StoreFile {
    type Error = TaskdagError;

    fn try_from(raw: RawStoreFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_store(&raw)?;

        // Dangling references and cycles are tolerated on load so that a
        // hand-edited file can still be opened and repaired; the engine
        // treats dangling ids as dead ends and reports cycles as
        // `GraphInvalid` when a schedule is requested.
        for (task, dep) in dangling_references(&raw.tasks) {
            warn!(task, dep, "dependency references a task that does not exist");
        }
        if let Err(err) = ensure_acyclic(&raw.tasks) {
            warn!(%err, "store file contains a dependency cycle");
        }

        let max_id = raw.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        let next_id = raw.next_id.unwrap_or(0).max(max_id + 1);

        Ok(StoreFile::new_unchecked(raw.tasks, next_id))
    }
}

fn validate_raw_store(raw: &RawStoreFile) -> Result<()> {
    let mut seen: BTreeSet<TaskId> = BTreeSet::new();
    for task in raw.tasks.iter() {
        if !seen.insert(task.id) {
            return Err(TaskdagError::StoreError(format!(
                "duplicate task id {} in store file",
                task.id
            )));
        }
        if task.title.trim().is_empty() {
            return Err(TaskdagError::StoreError(format!(
                "task {} has an empty title",
                task.id
            )));
        }
    }
    Ok(())
}

/// All (task, missing dependency) pairs in the snapshot.
pub fn dangling_references(tasks: &[Task]) -> Vec<(TaskId, TaskId)> {
    let ids: BTreeSet<TaskId> = tasks.iter().map(|t| t.id).collect();

    tasks
        .iter()
        .flat_map(|t| {
            t.depends_on
                .iter()
                .filter(|dep| !ids.contains(dep))
                .map(|dep| (t.id, *dep))
        })
        .collect()
}

/// Check that the dependency relation over the snapshot forms a DAG.
///
/// Edge direction: prerequisite -> dependent, matching the scheduling
/// direction. Edges whose prerequisite does not exist in the snapshot are
/// skipped; they cannot participate in a cycle.
pub fn ensure_acyclic(tasks: &[Task]) -> Result<()> {
    let ids: BTreeSet<TaskId> = tasks.iter().map(|t| t.id).collect();
    let mut graph: DiGraphMap<TaskId, ()> = DiGraphMap::new();

    for task in tasks.iter() {
        graph.add_node(task.id);
    }

    for task in tasks.iter() {
        for dep in task.depends_on.iter() {
            if ids.contains(dep) {
                graph.add_edge(*dep, task.id, ());
            }
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(TaskdagError::GraphInvalid(format!(
            "cycle detected in the dependency graph involving task {}",
            cycle.node_id()
        ))),
    }
}
