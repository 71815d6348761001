// src/graph/mod.rs

//! Task dependency graph engine.
//!
//! - [`model`] builds adjacency and in-degree structures from a snapshot.
//! - [`validate`] pre-checks single-edge toggles against acyclicity.
//! - [`topo`] produces a deterministic topological order (Kahn's algorithm).
//! - [`critical`] computes earliest starts and backtracks the critical path.
//! - [`schedule`] ties the sorter and analyzer together for callers.
//! - [`chain`] extracts the reachable dependency subgraph for a root task.
//!
//! Every operation here is a pure function over the snapshot it is given;
//! nothing is retained or mutated across calls. Committing a validated edge
//! set is the store's job.

pub mod chain;
pub mod critical;
pub mod model;
pub mod schedule;
pub mod topo;
pub mod validate;

pub use chain::{Chain, extract_chain};
pub use critical::{CriticalPath, analyze};
pub use model::DepGraph;
pub use schedule::{Schedule, compute_schedule};
pub use topo::topo_sort;
pub use validate::{toggle_dependency, validate_new_edge};
