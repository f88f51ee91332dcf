//! Graph construction module

use crate::error::GraphError;
use crate::graph::{Graph, NodeId};

/// Builder for incrementally describing a Graph
///
/// Nodes and edges are recorded as given and only validated in `build`, which
/// applies them in order with the same rules as `Graph::add_node` and
/// `Graph::add_edge`.
pub struct GraphBuilder<N> {
    /// Node ids in insertion order
    nodes: Vec<N>,

    /// Edge endpoints in insertion order
    edges: Vec<(N, N)>,
}

impl<N: NodeId> Default for GraphBuilder<N> {
    fn default() -> Self {
        Self::with_capacity(0, 0)
    }
}

impl<N: NodeId> GraphBuilder<N> {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(node_capacity),
            edges: Vec::with_capacity(edge_capacity),
        }
    }

    /// Record a node
    pub fn node(mut self, id: N) -> Self {
        self.nodes.push(id);
        self
    }

    /// Record several nodes
    pub fn nodes<I: IntoIterator<Item = N>>(mut self, ids: I) -> Self {
        self.nodes.extend(ids);
        self
    }

    /// Record an undirected edge
    pub fn edge(mut self, a: N, b: N) -> Self {
        self.edges.push((a, b));
        self
    }

    /// Record several undirected edges
    pub fn edges<I: IntoIterator<Item = (N, N)>>(mut self, pairs: I) -> Self {
        self.edges.extend(pairs);
        self
    }

    /// Build the graph
    pub fn build(self) -> Result<Graph<N>, GraphError> {
        let mut graph = Graph::with_capacity(self.nodes.len());

        for id in self.nodes {
            graph.add_node(id)?;
        }

        for (a, b) in &self.edges {
            graph.add_edge(a, b)?;
        }

        log::debug!(
            "Built graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(graph)
    }
}
