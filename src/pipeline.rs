//! End-to-end analysis: graph -> maximal cliques -> overlap graph -> clusters

use std::collections::HashMap;

use anyhow::Result;
use ndarray::Array2;

use crate::clique::{find_all_maximal_cliques, find_all_maximal_cliques_parallel, Clique};
use crate::cluster::{
    assess_structure, build_derived_graph, cluster_cliques, overlap_matrix, rank_cliques,
    CliqueCluster, StructureDiagnostic,
};
use crate::config::Config;
use crate::graph::{Graph, NodeId};

/// Everything one analysis run derives from the input graph
#[derive(Debug, Clone)]
pub struct CliqueAnalysis {
    /// Maximal cliques, largest first (position = rank)
    pub cliques: Vec<Clique>,

    /// Shared-node counts indexed by clique rank
    pub overlap: Array2<usize>,

    /// Threshold used to link cliques
    pub threshold: usize,

    /// Overlap graph over clique ranks
    pub derived: Graph<usize>,

    /// Connected components of the overlap graph
    pub clusters: Vec<CliqueCluster>,

    pub structure: StructureDiagnostic,
}

/// Run the whole clique clustering pipeline on `graph`
///
/// Core failures keep their `GraphError` type inside the returned error, so a
/// caller can `downcast_ref::<GraphError>()` to tell an exhausted search guard
/// from a defect.
pub fn analyze<N: NodeId + Sync>(
    graph: &Graph<N>,
    attributes: Option<&HashMap<N, f64>>,
    config: &Config,
) -> Result<CliqueAnalysis> {
    config.validate()?;

    let limits = config.search_limits();
    let cliques = if config.parallel {
        find_all_maximal_cliques_parallel(graph, &limits)?
    } else {
        find_all_maximal_cliques(graph, &limits)?
    };

    let cliques = rank_cliques(cliques);
    if let Some(largest) = cliques.first() {
        log::debug!("Largest maximal clique has {} nodes", largest.len());
    }

    let overlap = overlap_matrix(&cliques);
    let threshold = config.threshold();
    let derived = build_derived_graph(&overlap, threshold)?;
    let clusters = cluster_cliques(graph, &cliques, &derived, attributes);
    let structure = assess_structure(&clusters, config.structure_ratio);

    Ok(CliqueAnalysis {
        cliques,
        overlap,
        threshold,
        derived,
        clusters,
        structure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::GraphBuilder;

    #[test]
    fn analysis_of_disjoint_triangles() {
        let graph = GraphBuilder::default()
            .nodes(0..6u32)
            .edges([(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)])
            .build()
            .unwrap();

        let analysis = analyze(&graph, None, &Config::default()).unwrap();
        assert_eq!(analysis.cliques.len(), 2);
        assert_eq!(analysis.threshold, 3);
        assert_eq!(analysis.derived.edge_count(), 0);
        assert_eq!(analysis.clusters.len(), 2);
        assert!(!analysis.structure.highly_structured);
    }

    #[test]
    fn exhausted_guard_is_reported_as_graph_error() {
        let graph = GraphBuilder::default()
            .nodes(0..4u32)
            .edges([(0, 1), (1, 2), (2, 3)])
            .build()
            .unwrap();
        let config = Config {
            max_search_states: Some(1),
            parallel: false,
            ..Config::default()
        };

        let err = analyze(&graph, None, &config).unwrap_err();
        let core = err.downcast_ref::<GraphError>().unwrap();
        assert!(core.is_recoverable());
    }

    #[test]
    fn invalid_config_is_rejected_before_search() {
        let graph: Graph<u32> = Graph::new();
        let config = Config {
            clique_size: 0,
            ..Config::default()
        };
        assert!(analyze(&graph, None, &config).is_err());
    }
}
