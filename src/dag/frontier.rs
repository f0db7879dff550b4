// src/dag/frontier.rs

//! The ready frontier: tasks eligible to start, smallest first.

use std::collections::BTreeSet;

use crate::dag::graph::TaskGraph;
use crate::types::TaskId;

/// Ascending, duplicate-free set of tasks whose prerequisites are all done.
///
/// Membership alone does not make a task startable: the scheduler asks
/// [`ReadyFrontier::first_startable`], which also checks the graph's
/// in-degree counter.
#[derive(Debug, Clone)]
pub struct ReadyFrontier<T> {
    ready: BTreeSet<T>,
}

impl<T> Default for ReadyFrontier<T> {
    fn default() -> Self {
        Self {
            ready: BTreeSet::new(),
        }
    }
}

impl<T: TaskId> ReadyFrontier<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frontier seeded with the graph's roots.
    pub fn seeded(graph: &TaskGraph<T>) -> Self {
        let mut frontier = Self::new();
        frontier.extend(graph.roots());
        frontier
    }

    /// Returns `false` if the task was already present.
    pub fn insert(&mut self, task: T) -> bool {
        self.ready.insert(task)
    }

    pub fn extend<I: IntoIterator<Item = T>>(&mut self, tasks: I) {
        self.ready.extend(tasks);
    }

    pub fn remove(&mut self, task: &T) -> bool {
        self.ready.remove(task)
    }

    pub fn peek_smallest(&self) -> Option<&T> {
        self.ready.first()
    }

    pub fn is_empty(&self) -> bool {
        self.ready.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ready.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.ready.iter()
    }

    /// Smallest member that still has no remaining prerequisite.
    pub fn first_startable(&self, graph: &TaskGraph<T>) -> Option<&T> {
        self.ready.iter().find(|task| graph.is_unlocked(task))
    }

    /// Remove and return [`ReadyFrontier::first_startable`].
    pub fn pop_startable(&mut self, graph: &TaskGraph<T>) -> Option<T> {
        let task = self.first_startable(graph)?.clone();
        self.ready.remove(&task);
        Some(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_members_sorted_and_unique() {
        let mut frontier = ReadyFrontier::new();
        assert!(frontier.insert('F'));
        assert!(frontier.insert('A'));
        assert!(!frontier.insert('F'));
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.peek_smallest(), Some(&'A'));
        assert!(frontier.remove(&'A'));
        assert_eq!(frontier.peek_smallest(), Some(&'F'));
    }

    #[test]
    fn skips_members_that_are_still_locked() {
        let graph: TaskGraph<char> = TaskGraph::build([('B', 'A')]);
        let mut frontier = ReadyFrontier::new();
        frontier.extend(['A', 'B']);

        assert_eq!(frontier.first_startable(&graph), Some(&'B'));
        assert_eq!(frontier.pop_startable(&graph), Some('B'));
        assert_eq!(frontier.pop_startable(&graph), None);
        assert!(!frontier.is_empty());
    }

    #[test]
    fn seeded_from_roots() {
        let graph: TaskGraph<char> = TaskGraph::build([('Q', 'A'), ('P', 'A')]).with_task('Z');
        let frontier = ReadyFrontier::seeded(&graph);
        let members: String = frontier.iter().collect();
        assert_eq!(members, "PQZ");
    }
}
