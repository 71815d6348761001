// src/graph/topo.rs

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::errors::{Result, TaskdagError};
use crate::graph::model::DepGraph;
use crate::store::TaskId;

/// Produce a topological order of the snapshot, or signal that the graph is
/// not acyclic.
///
/// Kahn's algorithm; the ready queue is a min-heap on task id, so whenever
/// several tasks are simultaneously ready the lowest id is emitted first.
/// That makes the order a deterministic function of the snapshot.
pub fn topo_sort(graph: &DepGraph) -> Result<Vec<TaskId>> {
    let mut in_degree: HashMap<TaskId, usize> = graph
        .task_ids()
        .iter()
        .map(|&id| (id, graph.in_degree_of(id)))
        .collect();

    let mut ready: BinaryHeap<Reverse<TaskId>> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(&id, _)| Reverse(id))
        .collect();

    let mut order: Vec<TaskId> = Vec::with_capacity(graph.len());

    while let Some(Reverse(id)) = ready.pop() {
        order.push(id);

        for &dependent in graph.dependents_of(id) {
            if let Some(degree) = in_degree.get_mut(&dependent) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }
    }

    // Any task left with a positive in-degree sits on a cycle; a partial
    // order would be misleading, so none is returned.
    if order.len() != graph.len() {
        return Err(TaskdagError::CycleDetected(format!(
            "{} of {} tasks are stuck on a dependency cycle",
            graph.len() - order.len(),
            graph.len()
        )));
    }

    Ok(order)
}
