// src/dag/task_info.rs

//! Per-task lifecycle state during one scheduling run.

use std::fmt;

/// Lifecycle of a task within a single run.
///
/// `Locked → Ready → Running → Done`; roots start out `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskState {
    /// At least one prerequisite has not finished.
    Locked,
    /// Every prerequisite is done; waiting for a free worker.
    Ready,
    /// Assigned to a worker slot.
    Running,
    /// Finished; its outgoing edges have been released.
    Done,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Done)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskState::Locked => "locked",
            TaskState::Ready => "ready",
            TaskState::Running => "running",
            TaskState::Done => "done",
        };
        f.write_str(s)
    }
}
