//! Core library functions for the clique cluster analyzer
//!
//! Builds an undirected compatibility graph, enumerates every maximal clique
//! with Bron-Kerbosch (pivoting, explicit stack), links cliques that share
//! enough members, and reports the connected components of that overlap
//! graph as clusters.

pub mod clique;
pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod storage;

pub use anyhow::{anyhow, Result};
pub use error::GraphError;
pub use pipeline::{analyze, CliqueAnalysis};
