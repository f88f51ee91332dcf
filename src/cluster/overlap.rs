//! Clique ranking, co-clique overlap matrix and the derived overlap graph

use std::cmp::Reverse;

use itertools::Itertools;
use ndarray::Array2;
use rayon::prelude::*;

use crate::clique::Clique;
use crate::error::GraphError;
use crate::graph::{Graph, NodeIndex};

/// Clique counts below this are compared on the calling thread
const PARALLEL_OVERLAP_THRESHOLD: usize = 1000;

/// Order cliques largest first; equal sizes keep their enumeration order
pub fn rank_cliques(mut cliques: Vec<Clique>) -> Vec<Clique> {
    cliques.sort_by_key(|clique| Reverse(clique.len()));
    cliques
}

/// Shared-node counts for every pair of ranked cliques
///
/// Only the upper triangle is computed and then mirrored, so the matrix is
/// symmetric by construction and its diagonal holds clique sizes.
pub fn overlap_matrix(cliques: &[Clique]) -> Array2<usize> {
    let n = cliques.len();
    log::info!("Computing {}x{} co-clique overlap matrix", n, n);

    let row = |i: usize| -> Vec<usize> {
        cliques[i..]
            .iter()
            .map(|other| cliques[i].shared_count(other))
            .collect()
    };

    let rows: Vec<Vec<usize>> = if n < PARALLEL_OVERLAP_THRESHOLD {
        (0..n).map(row).collect()
    } else {
        (0..n).into_par_iter().map(row).collect()
    };

    let mut matrix = Array2::zeros((n, n));
    for (i, upper) in rows.into_iter().enumerate() {
        for (offset, shared) in upper.into_iter().enumerate() {
            let j = i + offset;
            matrix[[i, j]] = shared;
            matrix[[j, i]] = shared;
        }
    }

    matrix
}

/// Graph over clique ranks linking cliques that share at least `threshold` nodes
///
/// Node `i` of the result is the clique of rank `i`.
pub fn build_derived_graph(
    overlap: &Array2<usize>,
    threshold: usize,
) -> Result<Graph<usize>, GraphError> {
    let n = overlap.nrows();
    debug_assert_eq!(n, overlap.ncols(), "overlap matrix must be square");

    let mut derived = Graph::with_capacity(n);
    for rank in 0..n {
        derived.add_node(rank)?;
    }

    for (i, j) in (0..n).tuple_combinations() {
        if overlap[[i, j]] >= threshold {
            derived.connect(i as NodeIndex, j as NodeIndex);
        }
    }

    log::info!(
        "Derived co-clique graph has {} nodes and {} edges at threshold {}",
        derived.node_count(),
        derived.edge_count(),
        threshold
    );

    Ok(derived)
}
