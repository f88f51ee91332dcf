use std::collections::BTreeSet;

use petgraph::graph::UnGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use clique_cluster_analyzer::clique::{
    find_all_maximal_cliques, find_all_maximal_cliques_parallel, Clique, SearchLimits,
};
use clique_cluster_analyzer::config::Config;
use clique_cluster_analyzer::graph::{Graph, UNREACHABLE};
use clique_cluster_analyzer::{analyze, CliqueAnalysis};

fn random_graph(rng: &mut StdRng, n: u32, edge_probability: f64) -> Graph<u32> {
    let mut graph = Graph::with_capacity(n as usize);
    for node in 0..n {
        graph.add_node(node).unwrap();
    }
    for a in 0..n {
        for b in a + 1..n {
            if rng.gen_bool(edge_probability) {
                graph.add_edge(&a, &b).unwrap();
            }
        }
    }
    graph
}

/// Every maximal clique found by checking all node subsets
fn brute_force_cliques(graph: &Graph<u32>) -> BTreeSet<Vec<u32>> {
    let n = graph.node_count() as u32;
    let is_clique = |mask: u32| {
        (0..n).filter(|i| mask & (1u32 << i) != 0).all(|a| {
            (a + 1..n)
                .filter(|j| mask & (1u32 << j) != 0)
                .all(|b| graph.adjacent(a, b))
        })
    };

    let mut maximal = BTreeSet::new();
    for mask in 1u32..(1u32 << n) {
        if !is_clique(mask) {
            continue;
        }
        let extendable = (0..n).any(|v| mask & (1u32 << v) == 0 && is_clique(mask | (1u32 << v)));
        if !extendable {
            maximal.insert((0..n).filter(|i| mask & (1u32 << i) != 0).collect());
        }
    }
    maximal
}

fn member_sets(cliques: &[Clique]) -> BTreeSet<Vec<u32>> {
    cliques.iter().map(|c| c.members().to_vec()).collect()
}

#[test]
fn cliques_match_brute_force_on_small_graphs() {
    let mut rng = StdRng::seed_from_u64(7);
    for round in 0..60 {
        let n = 1 + round % 12;
        let p = [0.2, 0.5, 0.8][round as usize % 3];
        let graph = random_graph(&mut rng, n, p);

        let cliques = find_all_maximal_cliques(&graph, &SearchLimits::unbounded()).unwrap();
        let found = member_sets(&cliques);

        assert_eq!(found.len(), cliques.len(), "clique emitted twice");
        assert_eq!(found, brute_force_cliques(&graph), "round {}", round);
        assert!(cliques.iter().all(|c| c.is_maximal_in(&graph)));
    }
}

#[test]
fn every_node_is_covered_by_a_clique() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let graph = random_graph(&mut rng, 15, 0.3);
        let cliques = find_all_maximal_cliques_parallel(&graph, &SearchLimits::unbounded()).unwrap();
        let covered: BTreeSet<u32> = cliques.iter().flat_map(|c| c.members().iter().copied()).collect();
        assert_eq!(covered.len(), graph.node_count());
    }
}

#[test]
fn parallel_and_sequential_agree() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..10 {
        let graph = random_graph(&mut rng, 30, 0.15);
        let sequential = find_all_maximal_cliques(&graph, &SearchLimits::unbounded()).unwrap();
        let parallel = find_all_maximal_cliques_parallel(&graph, &SearchLimits::unbounded()).unwrap();

        assert_eq!(parallel.len(), sequential.len());
        assert_eq!(member_sets(&parallel), member_sets(&sequential));
    }
}

#[test]
fn components_partition_nodes_and_match_petgraph() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..20 {
        let graph = random_graph(&mut rng, 25, 0.06);

        let components = graph.component_indices();
        let mut seen = BTreeSet::new();
        for component in &components {
            for &node in component {
                assert!(seen.insert(node), "node {} in two components", node);
            }
        }
        assert_eq!(seen.len(), graph.node_count());

        let mut reference = UnGraph::<(), ()>::new_undirected();
        let handles: Vec<_> = graph.indices().map(|_| reference.add_node(())).collect();
        for (a, b) in graph.edge_set() {
            reference.add_edge(handles[*a as usize], handles[*b as usize], ());
        }
        assert_eq!(components.len(), petgraph::algo::connected_components(&reference));
    }
}

#[test]
fn distances_are_consistent() {
    let mut rng = StdRng::seed_from_u64(43);
    let graph = random_graph(&mut rng, 20, 0.12);

    for source in graph.nodes() {
        let distances = graph.breadth_first_distances(source).unwrap();
        assert_eq!(distances[source], 0);
        for target in graph.nodes() {
            let hops = graph.shortest_distance(source, target).unwrap();
            assert_eq!(hops, distances[target]);
            assert!(hops >= 0 || hops == UNREACHABLE);
        }
    }

    let degree_sum: usize = graph.nodes().map(|node| graph.degree(node).unwrap()).sum();
    assert_eq!(degree_sum, 2 * graph.edge_count());
}

#[test]
fn overlap_matrix_is_symmetric_and_clustering_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(59);
    let graph = random_graph(&mut rng, 24, 0.35);
    let config = Config {
        clique_size: 3,
        ..Config::default()
    };

    let first = analyze(&graph, None, &config).unwrap();
    let second = analyze(&graph, None, &config).unwrap();

    let overlap = &first.overlap;
    assert_eq!(overlap.view(), overlap.t());
    for (rank, clique) in first.cliques.iter().enumerate() {
        assert_eq!(overlap[[rank, rank]], clique.len());
    }

    let partition = |analysis: &CliqueAnalysis| -> BTreeSet<Vec<usize>> {
        analysis.clusters.iter().map(|c| c.cliques.clone()).collect()
    };
    assert_eq!(partition(&first), partition(&second));

    let ranks: usize = first.clusters.iter().map(|c| c.cliques.len()).sum();
    assert_eq!(ranks, first.cliques.len());
}
