// src/engine/workers.rs

//! Fixed pool of simulated worker slots.

use crate::types::TaskId;

/// One worker: the task it is busy with, if any, and when that task ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSlot<T> {
    pub index: usize,
    pub task: Option<T>,
    /// Only meaningful while `task` is `Some`.
    pub finishes_at: u64,
}

impl<T> WorkerSlot<T> {
    pub fn is_free(&self) -> bool {
        self.task.is_none()
    }
}

/// Exactly `count` slots, created once per simulation.
#[derive(Debug, Clone)]
pub struct WorkerPool<T> {
    slots: Vec<WorkerSlot<T>>,
}

impl<T: TaskId> WorkerPool<T> {
    pub fn new(count: usize) -> Self {
        let slots = (0..count)
            .map(|index| WorkerSlot {
                index,
                task: None,
                finishes_at: 0,
            })
            .collect();
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[WorkerSlot<T>] {
        &self.slots
    }

    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_free()).count()
    }

    pub fn busy_count(&self) -> usize {
        self.slots.len() - self.free_count()
    }

    pub fn is_idle(&self) -> bool {
        self.slots.iter().all(WorkerSlot::is_free)
    }

    /// Put `task` on the lowest-index free slot. Returns the slot index, or
    /// `None` if every worker is busy.
    pub fn assign(&mut self, task: T, finishes_at: u64) -> Option<usize> {
        let slot = self.slots.iter_mut().find(|s| s.is_free())?;
        slot.task = Some(task);
        slot.finishes_at = finishes_at;
        Some(slot.index)
    }

    /// Earliest finish time among busy workers.
    pub fn next_completion(&self) -> Option<u64> {
        self.slots
            .iter()
            .filter(|s| !s.is_free())
            .map(|s| s.finishes_at)
            .min()
    }

    /// Free every slot whose task finishes at or before `now`.
    ///
    /// Returns `(slot index, task)` pairs in ascending task order so that
    /// simultaneous completions are processed deterministically.
    pub fn release_due(&mut self, now: u64) -> Vec<(usize, T)> {
        let mut due: Vec<(usize, T)> = self
            .slots
            .iter_mut()
            .filter(|s| !s.is_free() && s.finishes_at <= now)
            .filter_map(|s| s.task.take().map(|task| (s.index, task)))
            .collect();
        due.sort_by(|a, b| a.1.cmp(&b.1));
        due
    }

    /// Tasks currently running, by slot index.
    pub fn running(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|s| s.task.as_ref())
    }
}
