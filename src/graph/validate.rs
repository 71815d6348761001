// src/graph/validate.rs

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::errors::{Result, TaskdagError};
use crate::store::{Task, TaskId};

/// Pre-check whether making `task_id` depend on `candidate_id` would violate
/// acyclicity.
///
/// Walks the *existing* dependency relation from `candidate_id` (candidate,
/// then the candidate's own prerequisites, recursively) with an explicit
/// stack. If the walk reaches `task_id`, the new edge would close a cycle.
/// Ids with no task in the snapshot are dead ends; the visited set also
/// terminates the walk if the snapshot is already cyclic.
///
/// Returns `Ok(())` as a precondition result only; committing the updated
/// edge set is the caller's responsibility.
pub fn validate_new_edge(tasks: &[Task], task_id: TaskId, candidate_id: TaskId) -> Result<()> {
    if candidate_id == task_id {
        return Err(TaskdagError::SelfDependency(task_id));
    }

    let deps_by_id: HashMap<TaskId, &BTreeSet<TaskId>> =
        tasks.iter().map(|t| (t.id, &t.depends_on)).collect();

    let mut visited: HashSet<TaskId> = HashSet::new();
    let mut stack: Vec<TaskId> = vec![candidate_id];

    while let Some(id) = stack.pop() {
        if id == task_id {
            return Err(TaskdagError::CycleDetected(format!(
                "task {candidate_id} already (transitively) depends on task {task_id}"
            )));
        }
        if !visited.insert(id) {
            continue;
        }
        if let Some(deps) = deps_by_id.get(&id) {
            stack.extend(deps.iter().copied());
        }
    }

    Ok(())
}

/// Toggle a single dependency edge: remove it if present, otherwise validate
/// and add it.
///
/// Returns the updated edge set for `task_id`; the caller commits it
/// atomically (see `TaskStore::set_dependencies`). Applying the same toggle
/// twice returns the edge set to its original state.
pub fn toggle_dependency(
    tasks: &[Task],
    task_id: TaskId,
    candidate_id: TaskId,
) -> Result<BTreeSet<TaskId>> {
    let task = tasks
        .iter()
        .find(|t| t.id == task_id)
        .ok_or(TaskdagError::InvalidReference(task_id))?;

    let mut deps = task.depends_on.clone();

    if deps.remove(&candidate_id) {
        debug!(task = task_id, dep = candidate_id, "removed dependency");
        return Ok(deps);
    }

    if !tasks.iter().any(|t| t.id == candidate_id) {
        return Err(TaskdagError::InvalidReference(candidate_id));
    }

    validate_new_edge(tasks, task_id, candidate_id)?;
    deps.insert(candidate_id);
    debug!(task = task_id, dep = candidate_id, "added dependency");
    Ok(deps)
}
