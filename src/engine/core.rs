// src/engine/core.rs

//! Discrete-event simulation of a task graph on a fixed worker pool.
//!
//! The simulation is synchronous and deterministic. Time jumps straight to
//! the next completion instead of ticking. Each call to
//! [`Simulation::step`] handles exactly one event time:
//!
//! 1. every task finishing now completes, ascending by id, releasing its
//!    outgoing edges and moving newly unlocked dependents to `Ready`;
//! 2. free workers pick up the smallest startable `Ready` tasks;
//! 3. the clock advances to the earliest running finish time.
//!
//! Completions at a given time are fully processed before any assignment at
//! that same time. State is only observable between steps.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::dag::cycle::cycle_error;
use crate::dag::{ReadyFrontier, TaskGraph, TaskState};
use crate::engine::report::{SimulationReport, TaskSpan};
use crate::engine::workers::{WorkerPool, WorkerSlot};
use crate::errors::{Result, StepdagError};
use crate::types::TaskId;

/// What happened during one event time.
#[derive(Debug, Clone)]
pub struct SimulationStep<T> {
    /// Event time handled by this step.
    pub time: u64,
    /// Tasks that completed at `time`, ascending.
    pub completed: Vec<T>,
    /// Tasks started at `time`, in the order they were picked.
    pub started: Vec<TaskSpan<T>>,
    /// Whether every task is now done.
    pub finished: bool,
}

/// One run of the resource-bounded scheduler.
///
/// Owns a private copy of the graph, the ready frontier and the worker
/// slots for the duration of the run.
pub struct Simulation<T, F> {
    graph: TaskGraph<T>,
    frontier: ReadyFrontier<T>,
    states: BTreeMap<T, TaskState>,
    pool: WorkerPool<T>,
    duration: F,
    clock: u64,
    completion_order: Vec<T>,
    spans: Vec<TaskSpan<T>>,
    finished: bool,
}

impl<T, F> Simulation<T, F>
where
    T: TaskId,
    F: Fn(&T) -> u64,
{
    /// Prepare a run of `graph` on `workers` slots.
    ///
    /// Fails with `InvalidConfiguration` if `workers` is zero.
    pub fn new(graph: &TaskGraph<T>, workers: usize, duration: F) -> Result<Self> {
        if workers == 0 {
            return Err(StepdagError::invalid_config(
                "worker count must be >= 1 (got 0)",
            ));
        }

        let graph = graph.clone();
        let frontier = ReadyFrontier::seeded(&graph);
        let states = graph
            .all_task_ids()
            .map(|task| {
                let state = if graph.is_unlocked(task) {
                    TaskState::Ready
                } else {
                    TaskState::Locked
                };
                (task.clone(), state)
            })
            .collect();

        debug!(
            tasks = graph.len(),
            edges = graph.edge_count(),
            workers,
            roots = ?frontier.iter().collect::<Vec<_>>(),
            "simulation: prepared run"
        );

        Ok(Self {
            graph,
            frontier,
            states,
            pool: WorkerPool::new(workers),
            duration,
            clock: 0,
            completion_order: Vec::new(),
            spans: Vec::new(),
            finished: false,
        })
    }

    /// Current simulated time.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn state_of(&self, task: &T) -> Option<TaskState> {
        self.states.get(task).copied()
    }

    /// Tasks currently in `state`, ascending.
    pub fn tasks_in_state(&self, state: TaskState) -> Vec<T> {
        self.states
            .iter()
            .filter(|(_, s)| **s == state)
            .map(|(task, _)| task.clone())
            .collect()
    }

    pub fn frontier(&self) -> &ReadyFrontier<T> {
        &self.frontier
    }

    pub fn workers(&self) -> &[WorkerSlot<T>] {
        self.pool.slots()
    }

    /// Tasks completed so far, in completion order.
    pub fn completed(&self) -> &[T] {
        &self.completion_order
    }

    /// Handle the current event time and advance the clock.
    ///
    /// Once the run is finished, further calls return an empty step.
    pub fn step(&mut self) -> Result<SimulationStep<T>> {
        let time = self.clock;
        if self.finished {
            return Ok(SimulationStep {
                time,
                completed: Vec::new(),
                started: Vec::new(),
                finished: true,
            });
        }

        let completed = self.complete_due();
        let started = self.assign_ready()?;

        if self.completion_order.len() == self.graph.len() {
            self.finished = true;
            info!(
                total_time = time,
                tasks = self.completion_order.len(),
                workers = self.pool.len(),
                "simulation: all tasks done"
            );
            return Ok(SimulationStep {
                time,
                completed,
                started,
                finished: true,
            });
        }

        match self.pool.next_completion() {
            Some(next) => {
                debug!(from = time, to = next, "simulation: advancing clock");
                self.clock = next;
            }
            None => return Err(self.deadlock()),
        }

        Ok(SimulationStep {
            time,
            completed,
            started,
            finished: false,
        })
    }

    /// Step until every task is done.
    pub fn run(mut self) -> Result<SimulationReport<T>> {
        while !self.step()?.finished {}
        Ok(self.into_report())
    }

    fn into_report(self) -> SimulationReport<T> {
        SimulationReport {
            total_time: self.clock,
            workers: self.pool.len(),
            completion_order: self.completion_order,
            spans: self.spans,
        }
    }

    /// Complete every running task due at the current time.
    fn complete_due(&mut self) -> Vec<T> {
        let due = self.pool.release_due(self.clock);
        let mut completed = Vec::with_capacity(due.len());

        for (worker, task) in due {
            self.states.insert(task.clone(), TaskState::Done);
            let unlocked = self.graph.remove_all_outgoing(&task);
            debug!(
                task = %task,
                worker,
                time = self.clock,
                unlocked = ?unlocked,
                "task done; released outgoing edges"
            );

            for next in unlocked {
                self.states.insert(next.clone(), TaskState::Ready);
                self.frontier.insert(next);
            }

            self.completion_order.push(task.clone());
            completed.push(task);
        }

        completed
    }

    /// Hand the smallest startable tasks to free workers.
    fn assign_ready(&mut self) -> Result<Vec<TaskSpan<T>>> {
        let mut started = Vec::new();

        while self.pool.free_count() > 0 {
            let Some(task) = self.frontier.pop_startable(&self.graph) else {
                break;
            };

            let duration = (self.duration)(&task);
            if duration == 0 {
                return Err(StepdagError::invalid_config(format!(
                    "duration of task '{task}' must be positive (got 0)"
                )));
            }
            let finish = self.clock.checked_add(duration).ok_or_else(|| {
                StepdagError::invalid_config(format!(
                    "finish time of task '{task}' overflows (start {}, duration {duration})",
                    self.clock
                ))
            })?;

            let Some(worker) = self.pool.assign(task.clone(), finish) else {
                self.frontier.insert(task);
                break;
            };

            debug!(
                task = %task,
                worker,
                start = self.clock,
                finish,
                "task assigned to worker"
            );
            self.states.insert(task.clone(), TaskState::Running);

            let span = TaskSpan {
                task,
                worker,
                start: self.clock,
                finish,
            };
            self.spans.push(span.clone());
            started.push(span);
        }

        Ok(started)
    }

    /// Nothing running, nothing startable, tasks left: the graph has a cycle.
    fn deadlock(&self) -> StepdagError {
        let locked: Vec<T> = self
            .states
            .iter()
            .filter(|(_, state)| !state.is_terminal())
            .map(|(task, _)| task.clone())
            .collect();

        warn!(
            time = self.clock,
            locked = ?locked,
            "simulation: no task running or startable; graph has a cycle"
        );
        cycle_error(&self.graph, &locked)
    }
}
