//! Dependency graph over task candidates
//!
//! Nodes are candidate indices from one extraction run. An edge records that
//! one candidate must follow another. Duplicate edges are suppressed, but
//! cycles are kept as-is: callers that need an ordering ask for one and get
//! an error when the graph is cyclic.
//! Uses petgraph for graph operations.

use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Dependency graph contains a cycle through task {0}")]
    CycleDetected(usize),

    #[error("Task index out of range: {index} (graph has {len} tasks)")]
    TaskNotFound { index: usize, len: usize },

    #[error("Self-dependency not allowed: {0}")]
    SelfDependency(usize),
}

/// A "must follow" relation: the task at `from` depends on the task at `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    pub from_index: usize,
    pub to_index: usize,
}

/// A dependency graph keyed by candidate index
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Edge direction is prerequisite -> dependent
    graph: DiGraph<usize, ()>,

    /// Node index for each candidate index
    nodes: Vec<NodeIndex>,

    /// Edges in insertion order
    edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    /// Creates a graph with one node per candidate and no edges
    pub fn new(task_count: usize) -> Self {
        let mut graph = DiGraph::with_capacity(task_count, 0);
        let nodes = (0..task_count).map(|i| graph.add_node(i)).collect();
        Self {
            graph,
            nodes,
            edges: Vec::new(),
        }
    }

    /// Adds a dependency: `task` depends on `depends_on`
    ///
    /// Returns `Ok(false)` when the same ordered pair is already present.
    pub fn add_dependency(&mut self, task: usize, depends_on: usize) -> Result<bool, GraphError> {
        if task == depends_on {
            return Err(GraphError::SelfDependency(task));
        }

        let task_idx = self.node(task)?;
        let dep_idx = self.node(depends_on)?;

        if self.graph.find_edge(dep_idx, task_idx).is_some() {
            return Ok(false);
        }

        self.graph.add_edge(dep_idx, task_idx, ());
        self.edges.push(DependencyEdge {
            from_index: task,
            to_index: depends_on,
        });
        Ok(true)
    }

    fn node(&self, index: usize) -> Result<NodeIndex, GraphError> {
        self.nodes.get(index).copied().ok_or(GraphError::TaskNotFound {
            index,
            len: self.nodes.len(),
        })
    }

    /// Returns the indices a task depends on
    pub fn dependencies(&self, task: usize) -> BTreeSet<usize> {
        match self.nodes.get(task) {
            Some(idx) => self
                .graph
                .neighbors_directed(*idx, petgraph::Direction::Incoming)
                .filter_map(|n| self.graph.node_weight(n).copied())
                .collect(),
            None => BTreeSet::new(),
        }
    }

    /// Returns the indices that depend on a task
    pub fn dependents(&self, task: usize) -> BTreeSet<usize> {
        match self.nodes.get(task) {
            Some(idx) => self
                .graph
                .neighbors_directed(*idx, petgraph::Direction::Outgoing)
                .filter_map(|n| self.graph.node_weight(n).copied())
                .collect(),
            None => BTreeSet::new(),
        }
    }

    /// Returns the edges in the order they were recorded
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    /// Returns the dependency map: task index -> indices it depends on
    ///
    /// Only tasks with at least one dependency appear as keys.
    pub fn to_map(&self) -> BTreeMap<usize, BTreeSet<usize>> {
        let mut map: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
        for edge in &self.edges {
            map.entry(edge.from_index).or_default().insert(edge.to_index);
        }
        map
    }

    /// Returns true if the graph contains a cycle
    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Returns all task indices with prerequisites before dependents
    pub fn topological_order(&self) -> Result<Vec<usize>, GraphError> {
        toposort(&self.graph, None)
            .map(|order| {
                order
                    .into_iter()
                    .filter_map(|idx| self.graph.node_weight(idx).copied())
                    .collect()
            })
            .map_err(|cycle| {
                let index = self.graph.node_weight(cycle.node_id()).copied().unwrap_or_default();
                GraphError::CycleDetected(index)
            })
    }

    /// Returns the number of tasks in the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no tasks
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of recorded edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl PartialEq for DependencyGraph {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.edges == other.edges
    }
}

impl Eq for DependencyGraph {}

impl Serialize for DependencyGraph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Always serialize as the index -> set mapping
        let map = self.to_map();
        let mut out = serializer.serialize_map(Some(map.len()))?;
        for (task, deps) in &map {
            out.serialize_entry(task, deps)?;
        }
        out.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_graph() {
        let graph = DependencyGraph::new(0);
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert!(graph.to_map().is_empty());
    }

    #[test]
    fn add_dependency() {
        let mut graph = DependencyGraph::new(2);

        // 1 depends on 0
        assert_eq!(graph.add_dependency(1, 0), Ok(true));

        assert_eq!(graph.dependencies(1), BTreeSet::from([0]));
        assert_eq!(graph.dependents(0), BTreeSet::from([1]));
        assert_eq!(
            graph.edges(),
            &[DependencyEdge {
                from_index: 1,
                to_index: 0
            }]
        );
    }

    #[test]
    fn duplicate_edge_suppressed() {
        let mut graph = DependencyGraph::new(2);
        assert_eq!(graph.add_dependency(1, 0), Ok(true));
        assert_eq!(graph.add_dependency(1, 0), Ok(false));
        assert_eq!(graph.edge_count(), 1);

        // The reverse pair is a different edge
        assert_eq!(graph.add_dependency(0, 1), Ok(true));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn cycles_are_kept() {
        let mut graph = DependencyGraph::new(3);
        graph.add_dependency(1, 0).unwrap();
        graph.add_dependency(2, 1).unwrap();
        graph.add_dependency(0, 2).unwrap();

        assert_eq!(graph.edge_count(), 3);
        assert!(graph.is_cyclic());
        assert!(matches!(graph.topological_order(), Err(GraphError::CycleDetected(_))));
    }

    #[test]
    fn self_dependency_rejected() {
        let mut graph = DependencyGraph::new(1);
        assert_eq!(graph.add_dependency(0, 0), Err(GraphError::SelfDependency(0)));
    }

    #[test]
    fn unknown_task_returns_error() {
        let mut graph = DependencyGraph::new(1);
        let result = graph.add_dependency(0, 4);
        assert_eq!(result, Err(GraphError::TaskNotFound { index: 4, len: 1 }));
    }

    #[test]
    fn topological_order() {
        let mut graph = DependencyGraph::new(3);

        // 0 depends on 1, 1 depends on 2
        graph.add_dependency(0, 1).unwrap();
        graph.add_dependency(1, 2).unwrap();

        let order = graph.topological_order().unwrap();
        let pos = |i: usize| order.iter().position(|x| *x == i).unwrap();

        assert!(pos(2) < pos(1));
        assert!(pos(1) < pos(0));
    }

    #[test]
    fn serializes_as_map() {
        let mut graph = DependencyGraph::new(3);
        graph.add_dependency(2, 0).unwrap();
        graph.add_dependency(2, 1).unwrap();

        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json, serde_json::json!({ "2": [0, 1] }));
    }

    proptest! {
        #[test]
        fn edges_in_range_and_unique(n in 1usize..12, pairs in proptest::collection::vec((0usize..16, 0usize..16), 0..40)) {
            let mut graph = DependencyGraph::new(n);
            for (a, b) in pairs {
                let _ = graph.add_dependency(a, b);
            }

            let mut seen = BTreeSet::new();
            for edge in graph.edges() {
                prop_assert!(edge.from_index < n);
                prop_assert!(edge.to_index < n);
                prop_assert_ne!(edge.from_index, edge.to_index);
                prop_assert!(seen.insert((edge.from_index, edge.to_index)));
            }
        }
    }
}
