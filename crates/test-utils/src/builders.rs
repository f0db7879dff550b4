#![allow(dead_code)]

use std::collections::BTreeSet;

use stepdag::dag::TaskGraph;
use stepdag::types::Edge;

/// Builder for step graphs to simplify test setup.
///
/// ```ignore
/// let graph = GraphBuilder::new().edge('C', 'A').chain("ABC").task('X').build();
/// ```
pub struct GraphBuilder {
    edges: Vec<Edge<char>>,
    isolated: BTreeSet<char>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            isolated: BTreeSet::new(),
        }
    }

    /// `before` must finish before `after` can begin.
    pub fn edge(mut self, before: char, after: char) -> Self {
        self.edges.push(Edge::new(before, after));
        self
    }

    /// Every step waits for the one before it: `"ABC"` is `A -> B -> C`.
    pub fn chain(mut self, steps: &str) -> Self {
        let steps: Vec<char> = steps.chars().collect();
        for pair in steps.windows(2) {
            self.edges.push(Edge::new(pair[0], pair[1]));
        }
        self
    }

    /// A step with no prerequisites and no dependents.
    pub fn task(mut self, step: char) -> Self {
        self.isolated.insert(step);
        self
    }

    pub fn edges(&self) -> &[Edge<char>] {
        &self.edges
    }

    pub fn build(self) -> TaskGraph<char> {
        let mut graph = TaskGraph::build(self.edges);
        for step in self.isolated {
            graph.add_task(step);
        }
        graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `A = base + 1`, `B = base + 2`, …
pub fn letter_duration(base: u64) -> impl Fn(&char) -> u64 {
    move |step: &char| base + u64::from(*step as u8 - b'A' + 1)
}
