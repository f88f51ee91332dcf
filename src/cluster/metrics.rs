//! Cluster statistics and metrics

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::cluster::{AttributeSummary, CliqueCluster};
use crate::graph::{Graph, NodeId, NodeIndex};

/// Calculate density (actual edges / potential edges) of the induced subgraph
pub fn calculate_density<N: NodeId>(graph: &Graph<N>, members: &[NodeIndex]) -> f64 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton clusters have density 1
    }

    let potential_edges = n * (n - 1) / 2;
    graph.induced_edge_count(members) as f64 / potential_edges as f64
}

/// Summarize an external numeric attribute over cluster members
///
/// Members without a value are left out of the summary. Returns None when no
/// member carries a value.
pub fn summarize_attribute<N: NodeId>(
    graph: &Graph<N>,
    members: &[NodeIndex],
    attributes: &HashMap<N, f64>,
) -> Option<AttributeSummary> {
    let mut values = Vec::with_capacity(members.len());
    for &member in members {
        let id = graph.node_id(member);
        match attributes.get(id) {
            Some(&value) => values.push(value),
            None => log::warn!("No attribute value for node {}", id),
        }
    }

    if values.is_empty() {
        return None;
    }

    Some(AttributeSummary {
        count: values.len(),
        mean: values.iter().mean(),
        min: Statistics::min(values.iter()),
        max: Statistics::max(values.iter()),
    })
}

/// Advisory check of how dominant the largest cluster is
///
/// A community counts as highly structured (Vicsek criterion) when the
/// largest cluster holds more than `ratio` times as many nodes as the second
/// largest. It never alters the clustering itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureDiagnostic {
    /// Node count of the largest cluster (0 if there are none)
    pub largest: usize,

    /// Node count of the second largest cluster (0 if fewer than two)
    pub second_largest: usize,

    pub ratio: f64,

    /// Requires at least two clusters
    pub highly_structured: bool,
}

/// Compare the two largest clusters by node count
pub fn assess_structure(clusters: &[CliqueCluster], ratio: f64) -> StructureDiagnostic {
    let mut sizes: Vec<usize> = clusters.iter().map(|c| c.size).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));

    let largest = sizes.first().copied().unwrap_or(0);
    let second_largest = sizes.get(1).copied().unwrap_or(0);
    let highly_structured = sizes.len() >= 2 && largest as f64 > ratio * second_largest as f64;

    log::info!("Size of largest cluster: {}", largest);
    log::info!("Size of 2nd largest cluster: {}", second_largest);
    if highly_structured {
        log::info!("Community is highly structured according to Vicsek criterion");
    }

    StructureDiagnostic {
        largest,
        second_largest,
        ratio,
        highly_structured,
    }
}
