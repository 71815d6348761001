// src/graph/schedule.rs

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::errors::{Result, TaskdagError};
use crate::graph::critical::analyze;
use crate::graph::model::DepGraph;
use crate::graph::topo::topo_sort;
use crate::store::{Task, TaskId};

/// A computed schedule over one snapshot: the deterministic topological
/// order plus the analyzer outputs.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub order: Vec<TaskId>,
    pub earliest_start: BTreeMap<TaskId, Option<usize>>,
    pub predecessor: BTreeMap<TaskId, TaskId>,
    pub critical_nodes: BTreeSet<TaskId>,
    pub critical_edges: BTreeSet<(TaskId, TaskId)>,
}

/// Sort the snapshot and run the critical-path analysis.
///
/// A snapshot that fails to sort is reported as `GraphInvalid` and the
/// forward pass is never run; per-edge validation should make this
/// unreachable, but a mutation race (or a hand-edited store file) can hand
/// us a cyclic snapshot the engine did not create. Callers degrade to an
/// explicit "cannot compute" presentation rather than showing a partial
/// schedule.
pub fn compute_schedule(tasks: &[Task], target: Option<TaskId>) -> Result<Schedule> {
    if let Some(target) = target {
        if !tasks.iter().any(|t| t.id == target) {
            return Err(TaskdagError::InvalidReference(target));
        }
    }

    let graph = DepGraph::from_tasks(tasks);

    let order = match topo_sort(&graph) {
        Ok(order) => order,
        Err(TaskdagError::CycleDetected(msg)) => {
            return Err(TaskdagError::GraphInvalid(msg));
        }
        Err(err) => return Err(err),
    };

    debug!(tasks = order.len(), ?target, "computing schedule");
    let critical = analyze(&graph, &order, target);

    Ok(Schedule {
        order,
        earliest_start: critical.earliest_start,
        predecessor: critical.predecessor,
        critical_nodes: critical.critical_nodes,
        critical_edges: critical.critical_edges,
    })
}
