// src/engine/mod.rs

//! Scheduling engine.
//!
//! - [`core`] is the discrete-event simulation over a worker pool.
//! - [`workers`] models the fixed set of worker slots.
//! - [`report`] holds the result of a drained run.
//! - [`scheduler`] exposes the sequential and resource-bounded schedulers
//!   as plain functions over a [`crate::dag::TaskGraph`].

pub mod core;
pub mod report;
pub mod scheduler;
pub mod workers;

pub use self::core::{Simulation, SimulationStep};
pub use report::{SimulationReport, TaskSpan};
pub use scheduler::{sequential_order, simulate, total_time};
pub use workers::{WorkerPool, WorkerSlot};
