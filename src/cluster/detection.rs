//! Cluster detection over the co-clique overlap graph

use std::collections::{BTreeSet, HashMap};

use crate::clique::Clique;
use crate::cluster::metrics::{calculate_density, summarize_attribute};
use crate::cluster::CliqueCluster;
use crate::graph::{Graph, NodeId, NodeIndex};

/// Group ranked cliques into clusters: connected components of `derived`
///
/// Every clique rank lands in exactly one cluster. A cluster's nodes are the
/// union of its cliques' nodes, so one input node may appear in several
/// clusters. Clusters are ordered by node count (largest first), ties by
/// their smallest clique rank, and numbered in that order.
pub fn cluster_cliques<N: NodeId>(
    graph: &Graph<N>,
    cliques: &[Clique],
    derived: &Graph<usize>,
    attributes: Option<&HashMap<N, f64>>,
) -> Vec<CliqueCluster> {
    log::info!("Finding connected components of the co-clique graph");

    let mut clusters: Vec<CliqueCluster> = derived
        .component_indices()
        .into_iter()
        .map(|component| {
            let mut ranks: Vec<usize> = component
                .into_iter()
                .map(|idx| *derived.node_id(idx))
                .collect();
            ranks.sort_unstable();

            let members: Vec<NodeIndex> = ranks
                .iter()
                .flat_map(|&rank| cliques[rank].members().iter().copied())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();

            let density = calculate_density(graph, &members);
            let attribute = attributes.and_then(|values| summarize_attribute(graph, &members, values));

            CliqueCluster {
                id: 0,
                cliques: ranks,
                size: members.len(),
                members,
                density,
                attribute,
            }
        })
        .collect();

    clusters.sort_by(|a, b| {
        b.size
            .cmp(&a.size)
            .then_with(|| a.cliques.first().cmp(&b.cliques.first()))
    });
    for (id, cluster) in clusters.iter_mut().enumerate() {
        cluster.id = id as u32;
    }

    log::info!("Found {} clique clusters", clusters.len());

    clusters
}
