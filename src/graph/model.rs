// src/graph/model.rs

use std::collections::{BTreeSet, HashMap};

use crate::store::{Task, TaskId};

/// Adjacency and in-degree view of a task snapshot.
///
/// The adjacency direction is *inverted* relative to storage: tasks store
/// their prerequisites, while scheduling propagates forward from a
/// prerequisite to its dependents. The in-degree of a task is the number of
/// prerequisites it has within the snapshot; a dependency on an id that is
/// not present contributes nothing (dead ends are the store's problem to
/// report, not ours to trip over).
#[derive(Debug, Clone)]
pub struct DepGraph {
    /// All task ids, ascending.
    nodes: Vec<TaskId>,
    /// prerequisite -> dependents, each list ascending.
    dependents: HashMap<TaskId, Vec<TaskId>>,
    in_degree: HashMap<TaskId, usize>,
}

impl DepGraph {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let ids: BTreeSet<TaskId> = tasks.iter().map(|t| t.id).collect();

        let mut dependents: HashMap<TaskId, Vec<TaskId>> =
            ids.iter().map(|id| (*id, Vec::new())).collect();
        let mut in_degree: HashMap<TaskId, usize> = ids.iter().map(|id| (*id, 0)).collect();

        for task in tasks.iter() {
            for dep in task.depends_on.iter() {
                if !ids.contains(dep) {
                    continue;
                }
                if let Some(list) = dependents.get_mut(dep) {
                    list.push(task.id);
                }
                if let Some(degree) = in_degree.get_mut(&task.id) {
                    *degree += 1;
                }
            }
        }

        for list in dependents.values_mut() {
            list.sort_unstable();
        }

        Self {
            nodes: ids.into_iter().collect(),
            dependents,
            in_degree,
        }
    }

    /// All task ids, ascending.
    pub fn task_ids(&self) -> &[TaskId] {
        &self.nodes
    }

    /// Tasks that depend on `id`, ascending. Empty for unknown ids.
    pub fn dependents_of(&self, id: TaskId) -> &[TaskId] {
        self.dependents.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of prerequisites `id` has within the snapshot.
    pub fn in_degree_of(&self, id: TaskId) -> usize {
        self.in_degree.get(&id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
