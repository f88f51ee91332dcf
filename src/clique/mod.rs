//! Maximal clique enumeration module

pub mod bron_kerbosch;

pub use bron_kerbosch::{
    find_all_maximal_cliques, find_all_maximal_cliques_parallel, SearchLimits,
};

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, NodeId, NodeIndex};

/// A set of mutually adjacent nodes, stored as ascending node handles
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Clique {
    members: Vec<NodeIndex>,
}

impl Clique {
    /// Create a clique from node handles (order and repeats are irrelevant)
    pub fn new<I: IntoIterator<Item = NodeIndex>>(members: I) -> Self {
        let mut members: Vec<NodeIndex> = members.into_iter().collect();
        members.sort_unstable();
        members.dedup();
        Self { members }
    }

    /// Number of member nodes
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member handles in ascending order
    pub fn members(&self) -> &[NodeIndex] {
        &self.members
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.members.binary_search(&node).is_ok()
    }

    /// Number of nodes shared with another clique
    pub fn shared_count(&self, other: &Clique) -> usize {
        let (mut i, mut j, mut shared) = (0, 0, 0);
        while i < self.members.len() && j < other.members.len() {
            match self.members[i].cmp(&other.members[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }

    /// Resolve member handles to node ids
    pub fn labels<'g, N: NodeId>(&self, graph: &'g Graph<N>) -> Vec<&'g N> {
        self.members.iter().map(|&idx| graph.node_id(idx)).collect()
    }

    /// Whether every pair of members is adjacent in `graph`
    pub fn is_complete_in<N: NodeId>(&self, graph: &Graph<N>) -> bool {
        self.members.iter().enumerate().all(|(pos, &a)| {
            self.members[pos + 1..].iter().all(|&b| graph.adjacent(a, b))
        })
    }

    /// Whether the clique is complete and no outside node is adjacent to all members
    pub fn is_maximal_in<N: NodeId>(&self, graph: &Graph<N>) -> bool {
        if !self.is_complete_in(graph) {
            return false;
        }

        graph
            .indices()
            .filter(|idx| !self.contains(*idx))
            .all(|outside| !self.members.iter().all(|&m| graph.adjacent(outside, m)))
    }
}
