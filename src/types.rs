// src/types.rs

//! Small value types shared by the graph, the engine and the parser.

use std::fmt;

use clap::ValueEnum;

/// Anything usable as a task identifier.
///
/// The ordering of identifiers is the scheduler's tie-break: whenever more
/// than one task could start, the smallest one starts first.
pub trait TaskId: Ord + Clone + fmt::Debug + fmt::Display {}

impl<T: Ord + Clone + fmt::Debug + fmt::Display> TaskId for T {}

/// "`prerequisite` must be finished before `dependent` can begin."
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge<T> {
    pub prerequisite: T,
    pub dependent: T,
}

impl<T> Edge<T> {
    pub fn new(prerequisite: T, dependent: T) -> Self {
        Self {
            prerequisite,
            dependent,
        }
    }
}

impl<T> From<(T, T)> for Edge<T> {
    fn from((prerequisite, dependent): (T, T)) -> Self {
        Self::new(prerequisite, dependent)
    }
}

impl<T: fmt::Display> fmt::Display for Edge<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.prerequisite, self.dependent)
    }
}

/// Which scheduler output the CLI should print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Only the sequential order string.
    Order,
    /// Only the total simulated time.
    Time,
    /// Both, order first.
    #[default]
    Both,
}

impl OutputMode {
    pub fn wants_order(self) -> bool {
        matches!(self, OutputMode::Order | OutputMode::Both)
    }

    pub fn wants_time(self) -> bool {
        matches!(self, OutputMode::Time | OutputMode::Both)
    }
}
