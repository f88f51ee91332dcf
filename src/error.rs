//! Error types for graph construction and clique search

use std::time::Duration;
use thiserror::Error;

/// Resource guard that stopped a clique search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchGuard {
    /// Maximum number of search states popped from the work stack
    States(usize),

    /// Maximum wall-clock time spent in the search
    Elapsed(Duration),
}

impl std::fmt::Display for SearchGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchGuard::States(limit) => write!(f, "{} search states", limit),
            SearchGuard::Elapsed(limit) => write!(f, "{:.3}s", limit.as_secs_f64()),
        }
    }
}

/// Errors raised by the graph core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Node insertion with an id that is already present
    #[error("node {0} is already present in the graph")]
    DuplicateNode(String),

    /// Edge insertion or query referencing an absent node
    #[error("node {0} is not present in the graph")]
    UnknownNode(String),

    /// Clique search exceeded a configured guard
    #[error("clique search exceeded its limit of {guard} after exploring {explored} states")]
    ResourceExhaustion { guard: SearchGuard, explored: usize },
}

impl GraphError {
    /// Whether the caller can recover (report partial work, relax limits, abort cleanly)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GraphError::ResourceExhaustion { .. })
    }
}
