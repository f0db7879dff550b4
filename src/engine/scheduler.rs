// src/engine/scheduler.rs

//! Public scheduling operations.
//!
//! Both schedulers share one traversal: the sequential order is the
//! simulation with a single worker and unit durations.

use crate::dag::TaskGraph;
use crate::engine::core::Simulation;
use crate::engine::report::SimulationReport;
use crate::errors::Result;
use crate::types::TaskId;

/// Canonical total order: smallest ready task first.
///
/// For every edge `(p, d)`, `p` comes before `d`. Fails with
/// `CycleDetected` if some tasks can never become ready.
pub fn sequential_order<T: TaskId>(graph: &TaskGraph<T>) -> Result<Vec<T>> {
    let report = simulate(graph, 1, |_: &T| 1)?;
    Ok(report.start_order())
}

/// Drain `graph` on `workers` slots with per-task `duration`.
pub fn simulate<T, F>(
    graph: &TaskGraph<T>,
    workers: usize,
    duration: F,
) -> Result<SimulationReport<T>>
where
    T: TaskId,
    F: Fn(&T) -> u64,
{
    Simulation::new(graph, workers, duration)?.run()
}

/// Time at which the last task completes.
pub fn total_time<T, F>(graph: &TaskGraph<T>, workers: usize, duration: F) -> Result<u64>
where
    T: TaskId,
    F: Fn(&T) -> u64,
{
    Ok(simulate(graph, workers, duration)?.total_time)
}
