// src/graph/chain.rs

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::errors::{Result, TaskdagError};
use crate::store::{Task, TaskId};

/// The dependency subgraph reachable from a root, in dependency-first order.
#[derive(Debug, Clone)]
pub struct Chain {
    /// Reachable task ids in post-order: every prerequisite appears before
    /// the tasks that depend on it, and the root is always last.
    pub chain: Vec<TaskId>,
    /// The latest due date among the root's (transitive) prerequisites; the
    /// root cannot reasonably start before its slowest prerequisite
    /// finishes. Falls back to the root's own due date when it has no
    /// prerequisites in the snapshot.
    pub scheduling_bound: NaiveDate,
}

/// Depth-first post-order walk of the root's prerequisites.
///
/// The traversal uses an explicit frame stack, so chain depth is bounded by
/// the snapshot, not the call stack. A visited set guards against revisiting
/// shared prerequisites (and keeps the walk finite even on a snapshot whose
/// acyclicity has been violated). Referenced ids absent from the snapshot
/// are skipped as dead ends.
pub fn extract_chain(tasks: &[Task], root_id: TaskId) -> Result<Chain> {
    let by_id: HashMap<TaskId, &Task> = tasks.iter().map(|t| (t.id, t)).collect();

    let root = by_id
        .get(&root_id)
        .copied()
        .ok_or(TaskdagError::InvalidReference(root_id))?;

    // Frames hold (task, prerequisite list, next index); a frame's task is
    // appended only after all its prerequisites were pushed and resolved,
    // which yields the post-order.
    let mut stack: Vec<(TaskId, Vec<TaskId>, usize)> = Vec::new();
    let mut visited: HashSet<TaskId> = HashSet::new();
    let mut chain: Vec<TaskId> = Vec::new();

    visited.insert(root_id);
    stack.push((root_id, root.depends_on.iter().copied().collect(), 0));

    while let Some((id, deps, next)) = stack.last_mut() {
        if *next < deps.len() {
            let dep = deps[*next];
            *next += 1;

            if !visited.insert(dep) {
                continue;
            }
            if let Some(task) = by_id.get(&dep) {
                stack.push((dep, task.depends_on.iter().copied().collect(), 0));
            }
        } else {
            chain.push(*id);
            stack.pop();
        }
    }

    let scheduling_bound = chain
        .iter()
        .filter(|&&id| id != root_id)
        .filter_map(|id| by_id.get(id))
        .map(|t| t.due)
        .max()
        .unwrap_or(root.due);

    Ok(Chain {
        chain,
        scheduling_bound,
    })
}
