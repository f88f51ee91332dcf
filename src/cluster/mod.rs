//! Clique cluster analysis module

pub mod detection;
pub mod metrics;
pub mod overlap;

pub use detection::cluster_cliques;
pub use metrics::{assess_structure, StructureDiagnostic};
pub use overlap::{build_derived_graph, overlap_matrix, rank_cliques};

use serde::{Deserialize, Serialize};

use crate::graph::NodeIndex;

/// A connected component of the co-clique overlap graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliqueCluster {
    /// Position of this cluster in the size-ordered output
    pub id: u32,

    /// Ranks of member cliques, ascending
    pub cliques: Vec<usize>,

    /// Union of member clique nodes (handles into the input graph), ascending
    pub members: Vec<NodeIndex>,

    /// Number of member nodes
    pub size: usize,

    /// Density of the subgraph the members induce in the input graph
    pub density: f64,

    /// Aggregate of the external per-node attribute, if one was supplied
    pub attribute: Option<AttributeSummary>,
}

/// Summary of a numeric per-node attribute over a cluster's members
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeSummary {
    /// Members that carried a value
    pub count: usize,

    pub mean: f64,

    pub min: f64,

    pub max: f64,
}
