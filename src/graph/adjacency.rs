//! Adjacency-set representation of an undirected, unweighted simple graph

use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;
use std::hash::Hash;
use std::ops::Range;

use crate::error::GraphError;

/// Internal handle of a node: its insertion position in the graph
pub type NodeIndex = u32;

/// Requirements on a node identifier
pub trait NodeId: Clone + Eq + Hash + Display {}

impl<T: Clone + Eq + Hash + Display> NodeId for T {}

/// Undirected graph without self-loops or parallel edges
///
/// Nodes are interned to dense `NodeIndex` handles in insertion order, and
/// every adjacency set is kept sorted by handle, so all iteration over nodes
/// and neighbours is deterministic for a given construction sequence.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    /// Node ids in insertion order (position = NodeIndex)
    node_ids: Vec<N>,

    /// Mapping from node ids to their handles
    id_to_index: HashMap<N, NodeIndex>,

    /// Neighbour handles for each node
    adjacency: Vec<BTreeSet<NodeIndex>>,
}

impl<N: NodeId> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId> Graph<N> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty graph with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            node_ids: Vec::with_capacity(capacity),
            id_to_index: HashMap::with_capacity(capacity),
            adjacency: Vec::with_capacity(capacity),
        }
    }

    /// Insert a node, failing if the id is already present
    pub fn add_node(&mut self, id: N) -> Result<NodeIndex, GraphError> {
        if self.id_to_index.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id.to_string()));
        }

        let idx = self.node_ids.len() as NodeIndex;
        self.id_to_index.insert(id.clone(), idx);
        self.node_ids.push(id);
        self.adjacency.push(BTreeSet::new());

        Ok(idx)
    }

    /// Insert the undirected edge a-b
    ///
    /// Returns whether the edge was new. Re-adding an existing edge leaves the
    /// graph unchanged, and a self-loop request is ignored.
    pub fn add_edge(&mut self, a: &N, b: &N) -> Result<bool, GraphError> {
        let a_idx = self.index_of(a)?;
        let b_idx = self.index_of(b)?;

        Ok(self.connect(a_idx, b_idx))
    }

    /// Insert the undirected edge between two existing handles
    pub(crate) fn connect(&mut self, a: NodeIndex, b: NodeIndex) -> bool {
        if a == b {
            log::debug!("Ignoring self-loop on node {}", self.node_ids[a as usize]);
            return false;
        }

        let inserted = self.adjacency[a as usize].insert(b);
        self.adjacency[b as usize].insert(a);
        inserted
    }

    /// Handle of a node id
    pub fn index_of(&self, id: &N) -> Result<NodeIndex, GraphError> {
        self.id_to_index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }

    /// Id of a node handle
    ///
    /// Panics if the handle was not produced by this graph.
    pub fn node_id(&self, idx: NodeIndex) -> &N {
        &self.node_ids[idx as usize]
    }

    /// Whether the id is present
    pub fn contains(&self, id: &N) -> bool {
        self.id_to_index.contains_key(id)
    }

    /// Node ids in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.node_ids.iter()
    }

    /// All node handles
    pub fn indices(&self) -> Range<NodeIndex> {
        0..self.node_ids.len() as NodeIndex
    }

    /// Neighbours of a node, in insertion order
    pub fn neighbors(&self, id: &N) -> Result<Vec<&N>, GraphError> {
        let idx = self.index_of(id)?;
        Ok(self.adjacency[idx as usize]
            .iter()
            .map(|&n| self.node_id(n))
            .collect())
    }

    /// Neighbour handles of a node handle
    pub fn neighbor_indices(&self, idx: NodeIndex) -> &BTreeSet<NodeIndex> {
        &self.adjacency[idx as usize]
    }

    /// Whether a and b share an edge
    pub fn are_adjacent(&self, a: &N, b: &N) -> Result<bool, GraphError> {
        let a_idx = self.index_of(a)?;
        let b_idx = self.index_of(b)?;
        Ok(self.adjacent(a_idx, b_idx))
    }

    /// Adjacency test on handles
    pub fn adjacent(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.adjacency[a as usize].contains(&b)
    }

    /// Number of neighbours of a node
    pub fn degree(&self, id: &N) -> Result<usize, GraphError> {
        let idx = self.index_of(id)?;
        Ok(self.adjacency[idx as usize].len())
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Number of undirected edges, derived from the degree sum
    pub fn edge_count(&self) -> usize {
        let degree_sum: usize = self.adjacency.iter().map(|set| set.len()).sum();
        debug_assert!(degree_sum % 2 == 0, "adjacency lost symmetry");
        degree_sum / 2
    }

    /// Every undirected edge once, earlier-inserted endpoint first
    pub fn edge_set(&self) -> Vec<(&N, &N)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for a in self.indices() {
            for &b in self.adjacency[a as usize].range(a + 1..) {
                edges.push((self.node_id(a), self.node_id(b)));
            }
        }
        edges
    }

    /// Fraction of possible edges that are present
    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n < 2 {
            return 0.0;
        }

        let potential_edges = n * (n - 1) / 2;
        self.edge_count() as f64 / potential_edges as f64
    }

    /// Local clustering coefficient: linked neighbour pairs / possible pairs
    pub fn clustering_coefficient(&self, id: &N) -> Result<f64, GraphError> {
        let idx = self.index_of(id)?;
        let neighbors = &self.adjacency[idx as usize];
        let deg = neighbors.len();
        if deg <= 1 {
            return Ok(0.0);
        }

        let mut linked = 0usize;
        for &u in neighbors {
            linked += self.adjacency[u as usize]
                .range(u + 1..)
                .filter(|w| neighbors.contains(*w))
                .count();
        }

        Ok(2.0 * linked as f64 / (deg * (deg - 1)) as f64)
    }

    /// Number of edges with both endpoints among `members`
    pub fn induced_edge_count(&self, members: &[NodeIndex]) -> usize {
        let member_set: BTreeSet<NodeIndex> = members.iter().copied().collect();
        let mut edges = 0;
        for &a in &member_set {
            edges += self.adjacency[a as usize]
                .range(a + 1..)
                .filter(|b| member_set.contains(*b))
                .count();
        }
        edges
    }
}
