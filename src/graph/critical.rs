// src/graph/critical.rs

use std::collections::{BTreeMap, BTreeSet};

use crate::graph::model::DepGraph;
use crate::store::TaskId;

/// Result of the earliest-start / critical-path computation.
///
/// `earliest_start` maps every task to the number of hops from the nearest
/// prerequisite-free task along the longest incoming chain; `None` marks a
/// task the forward pass never reached (possible only when the snapshot has
/// dangling prerequisites). `critical_nodes` / `critical_edges` are empty
/// unless a reachable target was supplied.
#[derive(Debug, Clone, Default)]
pub struct CriticalPath {
    pub earliest_start: BTreeMap<TaskId, Option<usize>>,
    pub predecessor: BTreeMap<TaskId, TaskId>,
    pub critical_nodes: BTreeSet<TaskId>,
    pub critical_edges: BTreeSet<(TaskId, TaskId)>,
}

/// Single forward dynamic-programming pass over a topological order, plus a
/// predecessor backtrack from `target`.
///
/// Each task contributes a fixed unit cost of 1, so the earliest start of a
/// task is the length in hops of the longest chain of prerequisites ending
/// at it. O(tasks + edges).
///
/// The caller must only invoke this with an order produced by
/// [`crate::graph::topo_sort`] for the same snapshot; cycle handling happens
/// upstream (see [`crate::graph::compute_schedule`]).
pub fn analyze(graph: &DepGraph, topo_order: &[TaskId], target: Option<TaskId>) -> CriticalPath {
    let mut earliest_start: BTreeMap<TaskId, Option<usize>> = graph
        .task_ids()
        .iter()
        .map(|&id| {
            let start = if graph.in_degree_of(id) == 0 {
                Some(0)
            } else {
                None
            };
            (id, start)
        })
        .collect();

    let mut predecessor: BTreeMap<TaskId, TaskId> = BTreeMap::new();

    for &u in topo_order {
        let Some(Some(start_u)) = earliest_start.get(&u).copied() else {
            continue;
        };

        for &v in graph.dependents_of(u) {
            let candidate = start_u + 1;
            let current = earliest_start.get(&v).copied().flatten();
            if current.is_none_or(|c| candidate > c) {
                earliest_start.insert(v, Some(candidate));
                predecessor.insert(v, u);
            }
        }
    }

    let mut critical_nodes: BTreeSet<TaskId> = BTreeSet::new();
    let mut critical_edges: BTreeSet<(TaskId, TaskId)> = BTreeSet::new();

    if let Some(target) = target {
        if let Some(Some(_)) = earliest_start.get(&target) {
            let mut current = target;
            loop {
                critical_nodes.insert(current);
                match predecessor.get(&current) {
                    Some(&pred) => {
                        critical_edges.insert((pred, current));
                        current = pred;
                    }
                    None => break,
                }
            }
        }
    }

    CriticalPath {
        earliest_start,
        predecessor,
        critical_nodes,
        critical_edges,
    }
}
