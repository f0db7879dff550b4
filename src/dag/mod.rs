// src/dag/mod.rs

//! Prerequisite graph representation.
//!
//! - [`graph`] holds the task graph with per-task in-degree counters.
//! - [`frontier`] is the ordered set of tasks ready to start.
//! - [`task_info`] defines the per-run task lifecycle.
//! - [`cycle`] diagnoses graphs that cannot be drained.

pub mod cycle;
pub mod frontier;
pub mod graph;
pub mod task_info;

pub use cycle::{check_acyclic, find_cycle_among};
pub use frontier::ReadyFrontier;
pub use graph::TaskGraph;
pub use task_info::TaskState;
