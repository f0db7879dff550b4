// src/dag/graph.rs

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Edge, TaskId};

/// Internal node structure: immediate prerequisites and dependents, plus the
/// per-run in-degree counter.
#[derive(Debug, Clone)]
struct DagNode<T> {
    /// Tasks that must finish before this one can start.
    prerequisites: BTreeSet<T>,
    /// Tasks that list this one as a prerequisite.
    dependents: BTreeSet<T>,
    /// Prerequisites that have not been released yet.
    remaining: usize,
    /// Whether `remove_all_outgoing` already ran for this task.
    released: bool,
}

impl<T> DagNode<T> {
    fn new() -> Self {
        Self {
            prerequisites: BTreeSet::new(),
            dependents: BTreeSet::new(),
            remaining: 0,
            released: false,
        }
    }
}

/// In-memory prerequisite graph keyed by task identifier.
///
/// Edges are deduplicated on insertion, so feeding the same edge twice has
/// no effect. Readiness is tracked with an explicit in-degree counter per
/// task: [`TaskGraph::remove_all_outgoing`] decrements the counter of every
/// dependent exactly once, and a task is unlocked when its counter is zero.
///
/// Schedulers work on a clone of the caller's graph, so a built graph can be
/// scheduled any number of times.
#[derive(Debug, Clone)]
pub struct TaskGraph<T> {
    nodes: BTreeMap<T, DagNode<T>>,
    edge_count: usize,
}

impl<T> Default for TaskGraph<T> {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edge_count: 0,
        }
    }
}

impl<T: TaskId> TaskGraph<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(prerequisite, dependent)` pairs.
    ///
    /// Every endpoint becomes a task. Edges arrive already typed, so there
    /// is nothing left to reject here; malformed tokens are caught by the
    /// instruction parser in [`crate::input`].
    pub fn build<I, E>(edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<T>>,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge.into());
        }
        graph
    }

    /// Builder-style variant of [`TaskGraph::add_task`].
    pub fn with_task(mut self, task: T) -> Self {
        self.add_task(task);
        self
    }

    /// Register a task, which may have no edges at all.
    ///
    /// Returns `true` if the task was not known before.
    pub fn add_task(&mut self, task: T) -> bool {
        if self.nodes.contains_key(&task) {
            return false;
        }
        self.nodes.insert(task, DagNode::new());
        true
    }

    /// Insert one edge. Returns `false` for a duplicate.
    pub fn add_edge(&mut self, edge: Edge<T>) -> bool {
        let Edge {
            prerequisite,
            dependent,
        } = edge;

        self.add_task(prerequisite.clone());
        self.add_task(dependent.clone());

        let (inserted, prerequisite_released) = match self.nodes.get_mut(&prerequisite) {
            Some(node) => (node.dependents.insert(dependent.clone()), node.released),
            None => (false, false),
        };
        if !inserted {
            return false;
        }

        if let Some(node) = self.nodes.get_mut(&dependent) {
            node.prerequisites.insert(prerequisite);
            if !prerequisite_released {
                node.remaining += 1;
            }
        }
        self.edge_count += 1;
        true
    }

    /// Tasks that never appear as a dependent, ascending.
    pub fn roots(&self) -> Vec<T> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.prerequisites.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Release every edge whose prerequisite is `task`.
    ///
    /// Returns the dependents whose last remaining prerequisite this was,
    /// ascending. A second call for the same task returns nothing, so each
    /// edge is consumed at most once.
    pub fn remove_all_outgoing(&mut self, task: &T) -> Vec<T> {
        let dependents: Vec<T> = match self.nodes.get_mut(task) {
            Some(node) if !node.released => {
                node.released = true;
                node.dependents.iter().cloned().collect()
            }
            _ => return Vec::new(),
        };

        let mut unlocked = Vec::new();
        for dep in dependents {
            if let Some(node) = self.nodes.get_mut(&dep) {
                if node.remaining > 0 {
                    node.remaining -= 1;
                    if node.remaining == 0 {
                        unlocked.push(dep);
                    }
                }
            }
        }
        unlocked
    }

    /// Remaining unreleased prerequisites of `task`, or `None` if unknown.
    pub fn remaining_prerequisites(&self, task: &T) -> Option<usize> {
        self.nodes.get(task).map(|n| n.remaining)
    }

    /// `true` if `task` is known and has no remaining prerequisite.
    pub fn is_unlocked(&self, task: &T) -> bool {
        self.remaining_prerequisites(task) == Some(0)
    }

    /// Every distinct task, ascending.
    pub fn all_task_ids(&self) -> impl Iterator<Item = &T> {
        self.nodes.keys()
    }

    pub fn contains(&self, task: &T) -> bool {
        self.nodes.contains_key(task)
    }

    /// Number of distinct tasks.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Immediate dependents of a task, ascending.
    pub fn dependents_of<'a>(&'a self, task: &T) -> impl Iterator<Item = &'a T> + use<'a, T> {
        self.nodes.get(task).into_iter().flat_map(|n| n.dependents.iter())
    }

    /// Immediate prerequisites of a task, ascending.
    pub fn prerequisites_of<'a>(&'a self, task: &T) -> impl Iterator<Item = &'a T> + use<'a, T> {
        self.nodes
            .get(task)
            .into_iter()
            .flat_map(|n| n.prerequisites.iter())
    }

    /// All distinct edges, ordered by prerequisite then dependent.
    pub fn edges(&self) -> impl Iterator<Item = Edge<T>> + '_ {
        self.nodes.iter().flat_map(|(name, node)| {
            node.dependents
                .iter()
                .map(move |dep| Edge::new(name.clone(), dep.clone()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TaskGraph<char> {
        TaskGraph::build([
            ('C', 'A'),
            ('C', 'F'),
            ('A', 'B'),
            ('A', 'D'),
            ('B', 'E'),
            ('D', 'E'),
            ('F', 'E'),
        ])
    }

    #[test]
    fn build_collects_every_endpoint() {
        let graph = sample();
        let ids: String = graph.all_task_ids().collect();
        assert_eq!(ids, "ABCDEF");
        assert_eq!(graph.edge_count(), 7);
    }

    #[test]
    fn duplicate_edges_are_idempotent() {
        let graph: TaskGraph<char> = TaskGraph::build([('A', 'B'), ('A', 'B'), ('A', 'B')]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.remaining_prerequisites(&'B'), Some(1));
    }

    #[test]
    fn roots_are_tasks_without_incoming_edges() {
        let graph = sample().with_task('X');
        assert_eq!(graph.roots(), vec!['C', 'X']);
    }

    #[test]
    fn dependent_stays_locked_until_last_prerequisite_released() {
        let mut graph = sample();
        assert_eq!(graph.remaining_prerequisites(&'E'), Some(3));

        assert_eq!(graph.remove_all_outgoing(&'C'), vec!['A', 'F']);
        assert_eq!(graph.remove_all_outgoing(&'A'), vec!['B', 'D']);
        assert!(graph.remove_all_outgoing(&'B').is_empty());
        assert!(graph.remove_all_outgoing(&'F').is_empty());
        assert!(!graph.is_unlocked(&'E'));
        assert_eq!(graph.remove_all_outgoing(&'D'), vec!['E']);
        assert!(graph.is_unlocked(&'E'));
    }

    #[test]
    fn releasing_twice_consumes_edges_once() {
        let mut graph: TaskGraph<char> = TaskGraph::build([('A', 'C'), ('B', 'C')]);
        assert!(graph.remove_all_outgoing(&'A').is_empty());
        assert!(graph.remove_all_outgoing(&'A').is_empty());
        assert_eq!(graph.remaining_prerequisites(&'C'), Some(1));
    }

    #[test]
    fn edges_iterate_in_order() {
        let graph: TaskGraph<char> = TaskGraph::build([('B', 'C'), ('A', 'C'), ('A', 'B')]);
        let rendered: Vec<String> = graph.edges().map(|e| e.to_string()).collect();
        assert_eq!(rendered, vec!["A -> B", "A -> C", "B -> C"]);
    }

    #[test]
    fn unknown_task_queries_are_empty() {
        let graph = sample();
        assert_eq!(graph.remaining_prerequisites(&'Z'), None);
        assert_eq!(graph.dependents_of(&'Z').count(), 0);
        assert_eq!(graph.prerequisites_of(&'E').count(), 3);
    }
}
