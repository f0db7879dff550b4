// src/dag/cycle.rs

//! Cycle diagnosis for graphs that cannot be drained.
//!
//! The schedulers detect a cycle on their own (the frontier runs dry while
//! tasks are still locked). This module turns that into a useful report by
//! naming one concrete cycle, and offers an eager acyclicity check for
//! callers that want to validate a graph before scheduling it.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::dag::graph::TaskGraph;
use crate::errors::{Result, StepdagError};
use crate::types::TaskId;

/// Find one cycle among `tasks`, following edges between them.
///
/// The result lists the tasks in edge order, starting from the smallest
/// task of the cycle; it is empty if `tasks` contains no cycle.
pub fn find_cycle_among<T: TaskId>(graph: &TaskGraph<T>, tasks: &[T]) -> Vec<T> {
    let members: BTreeSet<&T> = tasks.iter().collect();

    let mut pg: DiGraph<&T, ()> = DiGraph::new();
    let mut index: BTreeMap<&T, NodeIndex> = BTreeMap::new();
    for task in &members {
        index.insert(*task, pg.add_node(*task));
    }
    for task in &members {
        for dep in graph.dependents_of(task) {
            if let Some(&to) = index.get(dep) {
                pg.add_edge(index[task], to, ());
            }
        }
    }

    // Smallest strongly connected component that actually loops, by its
    // smallest member, so the report is deterministic.
    let looping = tarjan_scc(&pg)
        .into_iter()
        .filter(|scc| scc.len() > 1 || pg.contains_edge(scc[0], scc[0]))
        .map(|scc| scc.into_iter().map(|ix| pg[ix]).collect::<BTreeSet<&T>>())
        .min_by(|a, b| a.first().cmp(&b.first()));

    let Some(component) = looping else {
        return Vec::new();
    };

    walk_cycle(graph, &component)
}

/// Walk smallest-successor edges inside a strongly connected component
/// until a task repeats; the repeated stretch is a cycle.
fn walk_cycle<T: TaskId>(graph: &TaskGraph<T>, component: &BTreeSet<&T>) -> Vec<T> {
    let Some(&start) = component.first() else {
        return Vec::new();
    };

    let mut path: Vec<&T> = vec![start];
    let mut seen: BTreeMap<&T, usize> = BTreeMap::new();
    seen.insert(start, 0);

    let mut current = start;
    loop {
        let Some(next) = graph.dependents_of(current).find(|d| component.contains(d)) else {
            return Vec::new();
        };
        if let Some(&at) = seen.get(next) {
            let mut cycle: Vec<T> = path[at..].iter().map(|t| (*t).clone()).collect();
            rotate_to_smallest(&mut cycle);
            return cycle;
        }
        seen.insert(next, path.len());
        path.push(next);
        current = next;
    }
}

fn rotate_to_smallest<T: TaskId>(cycle: &mut [T]) {
    if let Some((pos, _)) = cycle.iter().enumerate().min_by(|a, b| a.1.cmp(b.1)) {
        cycle.rotate_left(pos);
    }
}

/// Tasks that can never become ready, i.e. what a scheduler would leave
/// locked.
pub fn unreachable_tasks<T: TaskId>(graph: &TaskGraph<T>) -> Vec<T> {
    let mut work = graph.clone();
    let mut released: BTreeSet<T> = BTreeSet::new();
    let mut stack = work.roots();

    while let Some(task) = stack.pop() {
        stack.extend(work.remove_all_outgoing(&task));
        released.insert(task);
    }

    graph
        .all_task_ids()
        .filter(|t| !released.contains(*t))
        .cloned()
        .collect()
}

/// Build the error a scheduler reports when it deadlocks.
pub fn cycle_error<T: TaskId>(graph: &TaskGraph<T>, locked: &[T]) -> StepdagError {
    let cycle = find_cycle_among(graph, locked);
    StepdagError::CycleDetected {
        locked: locked.iter().map(|t| t.to_string()).collect(),
        cycle: cycle.iter().map(|t| t.to_string()).collect(),
    }
}

/// Eagerly verify that `graph` is acyclic.
pub fn check_acyclic<T: TaskId>(graph: &TaskGraph<T>) -> Result<()> {
    let mut pg: DiGraph<(), ()> = DiGraph::new();
    let mut index: BTreeMap<&T, NodeIndex> = BTreeMap::new();
    for task in graph.all_task_ids() {
        index.insert(task, pg.add_node(()));
    }
    for edge in graph.edges() {
        pg.add_edge(index[&edge.prerequisite], index[&edge.dependent], ());
    }

    match toposort(&pg, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            debug!(node = cycle.node_id().index(), "toposort hit a cycle");
            let locked = unreachable_tasks(graph);
            Err(cycle_error(graph, &locked))
        }
    }
}
