use std::collections::BTreeSet;

use clique_cluster_analyzer::clique::{find_all_maximal_cliques, SearchLimits};
use clique_cluster_analyzer::cluster::{build_derived_graph, cluster_cliques, overlap_matrix};
use clique_cluster_analyzer::config::Config;
use clique_cluster_analyzer::data::CompatibilityMatrix;
use clique_cluster_analyzer::graph::{Graph, GraphBuilder};
use clique_cluster_analyzer::{analyze, clique::Clique};

fn labelled_cliques(graph: &Graph<&'static str>, cliques: &[Clique]) -> BTreeSet<BTreeSet<&'static str>> {
    cliques
        .iter()
        .map(|clique| clique.labels(graph).into_iter().copied().collect())
        .collect()
}

#[test]
fn triangle_with_pendant_node() {
    let graph = GraphBuilder::default()
        .nodes(["A", "B", "C", "D"])
        .edges([("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")])
        .build()
        .unwrap();

    let cliques = find_all_maximal_cliques(&graph, &SearchLimits::unbounded()).unwrap();
    let expected: BTreeSet<BTreeSet<&str>> = [
        BTreeSet::from(["A", "B", "C"]),
        BTreeSet::from(["C", "D"]),
    ]
    .into_iter()
    .collect();

    assert_eq!(labelled_cliques(&graph, &cliques), expected);
    assert_eq!(graph.degree(&"C").unwrap(), 3);
    assert_eq!(graph.shortest_distance(&"A", &"D").unwrap(), 2);
}

#[test]
fn two_disjoint_triangles() {
    let graph = GraphBuilder::default()
        .nodes(["a1", "a2", "a3", "b1", "b2", "b3"])
        .edges([
            ("a1", "a2"),
            ("a2", "a3"),
            ("a3", "a1"),
            ("b1", "b2"),
            ("b2", "b3"),
            ("b3", "b1"),
        ])
        .build()
        .unwrap();

    let components: BTreeSet<BTreeSet<&str>> = graph
        .connected_components()
        .into_iter()
        .map(|component| component.into_iter().copied().collect())
        .collect();
    assert_eq!(components.len(), 2);
    assert!(components.iter().all(|component| component.len() == 3));

    let cliques = find_all_maximal_cliques(&graph, &SearchLimits::unbounded()).unwrap();
    assert_eq!(labelled_cliques(&graph, &cliques), components);
}

#[test]
fn overlapping_four_cliques_form_one_cluster() {
    // {0,1,2,3}, {0,1,2,4} and {0,1,2,5} pairwise share exactly {0,1,2}
    let graph = GraphBuilder::default().nodes(0..6u32).build().unwrap();
    let cliques = vec![
        Clique::new([0, 1, 2, 3]),
        Clique::new([0, 1, 2, 4]),
        Clique::new([0, 1, 2, 5]),
    ];

    let derived = build_derived_graph(&overlap_matrix(&cliques), 3).unwrap();
    assert_eq!(derived.edge_count(), 3);
    assert!(derived.nodes().all(|rank| derived.degree(rank).unwrap() == 2));

    let clusters = cluster_cliques(&graph, &cliques, &derived, None);
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].cliques, vec![0, 1, 2]);
    assert_eq!(clusters[0].members, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn overlapping_four_cliques_from_a_real_graph() {
    // Triangle core 0-1-2 plus three satellites each joined to the whole core
    let mut builder = GraphBuilder::default().nodes(0..6u32).edges([(0, 1), (1, 2), (2, 0)]);
    for satellite in 3..6u32 {
        for core in 0..3u32 {
            builder = builder.edge(satellite, core);
        }
    }
    let graph = builder.build().unwrap();

    let analysis = analyze(&graph, None, &Config::default()).unwrap();
    assert_eq!(analysis.cliques.len(), 3);
    assert!(analysis.cliques.iter().all(|clique| clique.len() == 4));
    assert_eq!(analysis.clusters.len(), 1);
    assert_eq!(analysis.clusters[0].size, 6);
}

#[test]
fn matrix_file_to_clusters() {
    let input = "g1\t0\t1\t1\t0\t0\n\
                 g2\t1\t0\t1\t0\t0\n\
                 g3\t1\t1\t0\t0\t0\n\
                 g4\t0\t0\t0\t0\t1\n\
                 g5\t0\t0\t0\t1\t0\n";
    let matrix = CompatibilityMatrix::from_reader(input.as_bytes()).unwrap();
    let graph = matrix.to_graph().unwrap();

    let config = Config {
        clique_size: 2,
        ..Config::default()
    };
    let analysis = analyze(&graph, None, &config).unwrap();

    assert_eq!(analysis.cliques[0].len(), 3);
    assert_eq!(analysis.clusters.len(), 2);
    assert_eq!(analysis.structure.largest, 3);
    assert_eq!(analysis.structure.second_largest, 2);
    assert!(!analysis.structure.highly_structured);
}
