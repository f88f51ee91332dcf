//! Results persistence module

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, to_string_pretty};

use crate::graph::{Graph, NodeId, NodeIndex};
use crate::pipeline::CliqueAnalysis;

/// Save analysis results to the specified directory
///
/// Writes `<prefix>.cliques.txt`, `<prefix>.co-clique.tsv`,
/// `<prefix>.cliqueClusters.tsv` and `summary.json`.
pub fn save_results<N: NodeId>(
    analysis: &CliqueAnalysis,
    graph: &Graph<N>,
    attributes: Option<&HashMap<N, f64>>,
    output_dir: &str,
    prefix: &str,
) -> Result<()> {
    log::info!("Saving {} clusters to {}", analysis.clusters.len(), output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir))?;

    let base = Path::new(output_dir);
    save_cliques(analysis, graph, &base.join(format!("{}.cliques.txt", prefix)))?;
    save_overlap_matrix(analysis, &base.join(format!("{}.co-clique.tsv", prefix)))?;
    save_clusters(
        analysis,
        graph,
        attributes,
        &base.join(format!("{}.cliqueClusters.tsv", prefix)),
    )?;
    save_summary(analysis, graph, &base.join("summary.json"))?;

    log::info!("Results saved successfully");

    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// One line per ranked clique: `Clique<rank>` followed by member ids
fn save_cliques<N: NodeId>(analysis: &CliqueAnalysis, graph: &Graph<N>, path: &Path) -> Result<()> {
    log::info!("Saving ranked cliques");

    let mut out = create(path)?;
    for (rank, clique) in analysis.cliques.iter().enumerate() {
        write!(out, "Clique{}", rank)?;
        for id in clique.labels(graph) {
            write!(out, "\t{}", id)?;
        }
        writeln!(out)?;
    }
    out.flush()?;

    Ok(())
}

/// Square shared-node matrix with rows labelled by clique rank
fn save_overlap_matrix(analysis: &CliqueAnalysis, path: &Path) -> Result<()> {
    log::info!("Saving co-clique overlap matrix");

    let mut out = create(path)?;
    for (rank, row) in analysis.overlap.rows().into_iter().enumerate() {
        write!(out, "Clique{}", rank)?;
        for shared in row.iter() {
            write!(out, "\t{}", shared)?;
        }
        writeln!(out)?;
    }
    out.flush()?;

    Ok(())
}

/// Members ordered by attribute value (largest first); members without one go last
fn order_by_attribute<N: NodeId>(
    graph: &Graph<N>,
    members: &[NodeIndex],
    attributes: Option<&HashMap<N, f64>>,
) -> Vec<(NodeIndex, Option<f64>)> {
    let mut ordered: Vec<(NodeIndex, Option<f64>)> = members
        .iter()
        .map(|&idx| {
            let value = attributes.and_then(|values| values.get(graph.node_id(idx)).copied());
            (idx, value)
        })
        .collect();

    ordered.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => y.total_cmp(&x).then(a.0.cmp(&b.0)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });
    ordered
}

/// Per cluster: member cliques, member nodes and the attribute aggregate
fn save_clusters<N: NodeId>(
    analysis: &CliqueAnalysis,
    graph: &Graph<N>,
    attributes: Option<&HashMap<N, f64>>,
    path: &Path,
) -> Result<()> {
    log::info!("Saving clique clusters");

    let mut out = create(path)?;
    for cluster in &analysis.clusters {
        writeln!(out, "Cluster {}", cluster.id)?;

        let cliques: Vec<String> = cluster.cliques.iter().map(|rank| format!("Clique{}", rank)).collect();
        writeln!(out, "Cliques ({}): {}", cliques.len(), cliques.join(","))?;

        let ordered = order_by_attribute(graph, &cluster.members, attributes);
        let nodes: Vec<String> = ordered.iter().map(|(idx, _)| graph.node_id(*idx).to_string()).collect();
        writeln!(out, "Nodes ({}): {}", nodes.len(), nodes.join(","))?;

        if let Some(summary) = cluster.attribute {
            let values: Vec<String> = ordered
                .iter()
                .filter_map(|(_, value)| value.map(|v| v.to_string()))
                .collect();
            writeln!(out, "Attribute ({:.2}): {}", summary.mean, values.join(","))?;
        }

        writeln!(out)?;
    }
    out.flush()?;

    Ok(())
}

/// Save summary information
fn save_summary<N: NodeId>(analysis: &CliqueAnalysis, graph: &Graph<N>, path: &Path) -> Result<()> {
    log::info!("Saving summary information");

    let clique_sizes: Vec<usize> = analysis.cliques.iter().map(|c| c.len()).collect();
    let clusters = &analysis.clusters;

    let summary = json!({
        "graph_stats": {
            "node_count": graph.node_count(),
            "edge_count": graph.edge_count(),
            "density": graph.density(),
        },
        "clique_stats": {
            "clique_count": analysis.cliques.len(),
            "largest_clique_size": clique_sizes.first().copied().unwrap_or(0),
            "smallest_clique_size": clique_sizes.last().copied().unwrap_or(0),
            "overlap_threshold": analysis.threshold,
            "derived_edge_count": analysis.derived.edge_count(),
        },
        "cluster_stats": {
            "cluster_count": clusters.len(),
            "largest_cluster_size": analysis.structure.largest,
            "second_largest_cluster_size": analysis.structure.second_largest,
            "avg_cluster_size": clusters.iter().map(|c| c.size).sum::<usize>() as f64 /
                                if clusters.is_empty() { 1.0 } else { clusters.len() as f64 },
            "avg_density": clusters.iter().map(|c| c.density).sum::<f64>() /
                           if clusters.is_empty() { 1.0 } else { clusters.len() as f64 },
        },
        "structure": analysis.structure,
        "clusters": clusters,
    });

    let mut file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}
