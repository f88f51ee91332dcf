//! Configuration management for the clique cluster analyzer

use std::time::Duration;

use anyhow::{ensure, Result};

use crate::clique::SearchLimits;

/// Configuration for one analysis run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Target clique size k; cliques sharing k - 1 nodes are linked by default
    pub clique_size: usize,

    /// Explicit overlap threshold overriding k - 1
    pub overlap_threshold: Option<usize>,

    /// Largest/second-largest cluster ratio for the structure diagnostic
    pub structure_ratio: f64,

    /// Maximum number of clique search states
    pub max_search_states: Option<usize>,

    /// Maximum wall-clock time for the clique search
    pub max_search_time: Option<Duration>,

    /// Enumerate cliques per input component on the rayon pool
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clique_size: 4,
            overlap_threshold: None,
            structure_ratio: 2.0,
            max_search_states: None,
            max_search_time: None,
            parallel: true,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        clique_size: usize,
        overlap_threshold: Option<usize>,
        structure_ratio: f64,
        max_search_states: Option<usize>,
        max_search_time: Option<Duration>,
        parallel: bool,
    ) -> Self {
        Self {
            clique_size,
            overlap_threshold,
            structure_ratio,
            max_search_states,
            max_search_time,
            parallel,
        }
    }

    /// Reject settings the pipeline cannot honour
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.clique_size >= 2,
            "clique size must be at least 2, got {}",
            self.clique_size
        );
        ensure!(
            self.structure_ratio.is_finite() && self.structure_ratio > 0.0,
            "structure ratio must be a positive number, got {}",
            self.structure_ratio
        );
        ensure!(
            self.max_search_states != Some(0),
            "search state limit must be positive"
        );
        ensure!(
            self.max_search_time != Some(Duration::ZERO),
            "search time limit must be positive"
        );
        Ok(())
    }

    /// Effective overlap threshold for linking cliques
    pub fn threshold(&self) -> usize {
        self.overlap_threshold
            .unwrap_or_else(|| self.clique_size.saturating_sub(1))
    }

    /// Guards for the clique search
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_states: self.max_search_states,
            max_duration: self.max_search_time,
        }
    }
}
