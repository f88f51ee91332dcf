//! Bron-Kerbosch maximal clique search (version 2, with pivoting)
//!
//! The search runs over an explicit work stack instead of recursion. Each
//! stack entry owns its candidate and excluded sets, so branching never
//! aliases state between siblings. Sets are ordered by node handle, which
//! makes the branch order and the order of emitted cliques deterministic.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::clique::Clique;
use crate::error::{GraphError, SearchGuard};
use crate::graph::{Graph, NodeId, NodeIndex};

/// Elapsed time is only sampled once per this many search states
const CLOCK_SAMPLE_INTERVAL: usize = 1024;

/// Guards bounding a clique search on adversarial (dense) inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of search states popped from the work stack
    pub max_states: Option<usize>,

    /// Maximum wall-clock time for the whole search
    pub max_duration: Option<Duration>,
}

impl SearchLimits {
    /// No guards: the search always runs to completion
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = Some(max_states);
        self
    }

    pub fn with_max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration = Some(max_duration);
        self
    }
}

/// Shared accounting of explored states, safe to charge from worker threads
struct SearchBudget {
    limits: SearchLimits,
    explored: AtomicUsize,
    started: Instant,
}

impl SearchBudget {
    fn new(limits: SearchLimits) -> Self {
        Self {
            limits,
            explored: AtomicUsize::new(0),
            started: Instant::now(),
        }
    }

    /// Account for one popped state
    fn charge(&self) -> Result<(), GraphError> {
        let explored = self.explored.fetch_add(1, Ordering::Relaxed) + 1;

        if let Some(max_states) = self.limits.max_states {
            if explored > max_states {
                return Err(GraphError::ResourceExhaustion {
                    guard: SearchGuard::States(max_states),
                    explored,
                });
            }
        }

        if let Some(max_duration) = self.limits.max_duration {
            if explored % CLOCK_SAMPLE_INTERVAL == 0 && self.started.elapsed() > max_duration {
                return Err(GraphError::ResourceExhaustion {
                    guard: SearchGuard::Elapsed(max_duration),
                    explored,
                });
            }
        }

        Ok(())
    }

    fn explored(&self) -> usize {
        self.explored.load(Ordering::Relaxed)
    }
}

/// One node of the search tree
struct SearchState {
    /// Clique under construction
    compsub: Vec<NodeIndex>,

    /// Nodes that may still extend `compsub`
    candidates: BTreeSet<NodeIndex>,

    /// Nodes already tried at this branch
    excluded: BTreeSet<NodeIndex>,

    /// Candidate or excluded node whose neighbours are skipped when branching
    pivot: Option<NodeIndex>,

    /// Candidates not adjacent to `pivot` (branches left at this state)
    pivot_disconnects: usize,
}

impl SearchState {
    /// Whether `compsub` is a maximal clique
    fn is_terminal(&self) -> bool {
        self.candidates.is_empty() && self.excluded.is_empty()
    }

    /// Whether the state can still emit a clique
    fn is_live(&self) -> bool {
        self.is_terminal() || self.pivot_disconnects > 0
    }
}

/// Clique search over one graph
struct CliqueSearch<'g, N> {
    graph: &'g Graph<N>,
}

impl<'g, N: NodeId> CliqueSearch<'g, N> {
    fn new(graph: &'g Graph<N>) -> Self {
        Self { graph }
    }

    /// Count of candidates not adjacent to `node`
    fn disconnects(&self, candidates: &BTreeSet<NodeIndex>, node: NodeIndex) -> usize {
        let neighbors = self.graph.neighbor_indices(node);
        candidates.len() - candidates.intersection(neighbors).count()
    }

    /// Build a search state, choosing the pivot with the fewest disconnections
    fn state(
        &self,
        compsub: Vec<NodeIndex>,
        candidates: BTreeSet<NodeIndex>,
        excluded: BTreeSet<NodeIndex>,
    ) -> SearchState {
        let mut pivot = None;
        let mut pivot_disconnects = usize::MAX;

        for &node in candidates.iter().chain(excluded.iter()) {
            let disconnects = self.disconnects(&candidates, node);
            if disconnects < pivot_disconnects {
                pivot = Some(node);
                pivot_disconnects = disconnects;
                if disconnects == 0 {
                    break;
                }
            }
        }

        SearchState {
            compsub,
            candidates,
            excluded,
            pivot,
            pivot_disconnects: if pivot.is_some() { pivot_disconnects } else { 0 },
        }
    }

    /// Enumerate every maximal clique whose members lie in `scope`
    ///
    /// `scope` must be closed under adjacency (a union of components) for the
    /// cliques to be maximal in the whole graph.
    fn run(&self, scope: BTreeSet<NodeIndex>, budget: &SearchBudget) -> Result<Vec<Clique>, GraphError> {
        let mut cliques = Vec::new();
        if scope.is_empty() {
            return Ok(cliques);
        }

        let mut stack = vec![self.state(Vec::new(), scope, BTreeSet::new())];

        while let Some(mut state) = stack.pop() {
            budget.charge()?;

            if state.is_terminal() {
                cliques.push(Clique::new(state.compsub));
                continue;
            }

            let Some(pivot) = state.pivot else {
                continue;
            };

            // Only candidates outside the pivot's neighbourhood need a branch
            let branch = state
                .candidates
                .iter()
                .copied()
                .find(|&u| !self.graph.adjacent(u, pivot));
            let Some(u) = branch else {
                continue;
            };

            state.candidates.remove(&u);
            let neighbors = self.graph.neighbor_indices(u);

            let mut child_compsub = Vec::with_capacity(state.compsub.len() + 1);
            child_compsub.extend_from_slice(&state.compsub);
            child_compsub.push(u);
            let child = self.state(
                child_compsub,
                state.candidates.intersection(neighbors).copied().collect(),
                state.excluded.intersection(neighbors).copied().collect(),
            );

            // Sibling: cliques without u. Switch the pivot to u when that
            // leaves fewer branches.
            state.excluded.insert(u);
            let kept_disconnects = state.pivot_disconnects - 1;
            let u_disconnects = self.disconnects(&state.candidates, u);
            if u_disconnects < kept_disconnects {
                state.pivot = Some(u);
                state.pivot_disconnects = u_disconnects;
            } else {
                state.pivot_disconnects = kept_disconnects;
            }

            if state.is_live() {
                stack.push(state);
            }
            if child.is_live() {
                stack.push(child);
            }
        }

        Ok(cliques)
    }
}

/// Find every maximal clique of `graph`
///
/// Each maximal clique is emitted exactly once. An empty graph has no
/// cliques and an isolated node is a clique of one.
pub fn find_all_maximal_cliques<N: NodeId>(
    graph: &Graph<N>,
    limits: &SearchLimits,
) -> Result<Vec<Clique>, GraphError> {
    log::info!(
        "Enumerating maximal cliques in graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let budget = SearchBudget::new(*limits);
    let cliques = CliqueSearch::new(graph).run(graph.indices().collect(), &budget)?;

    log::info!(
        "Found {} maximal cliques after exploring {} search states",
        cliques.len(),
        budget.explored()
    );

    Ok(cliques)
}

/// Find every maximal clique, searching connected components in parallel
///
/// Components share no nodes, so the per-component results are concatenated
/// in component order. The guards apply to the search as a whole.
pub fn find_all_maximal_cliques_parallel<N: NodeId + Sync>(
    graph: &Graph<N>,
    limits: &SearchLimits,
) -> Result<Vec<Clique>, GraphError> {
    let components = graph.component_indices();
    log::info!(
        "Enumerating maximal cliques across {} components in parallel",
        components.len()
    );

    let budget = SearchBudget::new(*limits);
    let search = CliqueSearch::new(graph);

    let per_component: Vec<Vec<Clique>> = components
        .into_par_iter()
        .map(|component| search.run(component.into_iter().collect(), &budget))
        .collect::<Result<_, _>>()?;

    let cliques: Vec<Clique> = per_component.into_iter().flatten().collect();

    log::info!(
        "Found {} maximal cliques after exploring {} search states",
        cliques.len(),
        budget.explored()
    );

    Ok(cliques)
}
