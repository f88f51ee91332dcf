//! Breadth-first traversal, hop distances and connected components

use std::collections::{HashMap, VecDeque};

use ndarray::Array2;

use crate::error::GraphError;
use crate::graph::{Graph, NodeId, NodeIndex};

/// Distance reported for nodes that cannot be reached
pub const UNREACHABLE: i32 = -1;

impl<N: NodeId> Graph<N> {
    /// Hop distance from `source` to every node handle, `UNREACHABLE` if none
    pub fn bfs_levels(&self, source: NodeIndex) -> Vec<i32> {
        let mut levels = vec![UNREACHABLE; self.node_count()];
        let mut queue = VecDeque::new();

        levels[source as usize] = 0;
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            let next_level = levels[current as usize] + 1;
            for &neighbor in self.neighbor_indices(current) {
                if levels[neighbor as usize] == UNREACHABLE {
                    levels[neighbor as usize] = next_level;
                    queue.push_back(neighbor);
                }
            }
        }

        levels
    }

    /// Hop distance from `source` to every node in the graph
    pub fn breadth_first_distances(&self, source: &N) -> Result<HashMap<&N, i32>, GraphError> {
        let source_idx = self.index_of(source)?;
        let levels = self.bfs_levels(source_idx);

        Ok(self.nodes().zip(levels).collect())
    }

    /// Hop distance between two nodes, stopping as soon as `target` is dequeued
    pub fn shortest_distance(&self, source: &N, target: &N) -> Result<i32, GraphError> {
        let source_idx = self.index_of(source)?;
        let target_idx = self.index_of(target)?;

        let mut levels = vec![UNREACHABLE; self.node_count()];
        let mut queue = VecDeque::new();
        levels[source_idx as usize] = 0;
        queue.push_back(source_idx);

        while let Some(current) = queue.pop_front() {
            let level = levels[current as usize];
            if current == target_idx {
                return Ok(level);
            }

            for &neighbor in self.neighbor_indices(current) {
                if levels[neighbor as usize] == UNREACHABLE {
                    levels[neighbor as usize] = level + 1;
                    queue.push_back(neighbor);
                }
            }
        }

        Ok(UNREACHABLE)
    }

    /// Partition of node handles into connected components
    ///
    /// Components are discovered by BFS from the lowest unprocessed handle,
    /// and each component lists its handles in ascending order.
    pub fn component_indices(&self) -> Vec<Vec<NodeIndex>> {
        let mut processed = vec![false; self.node_count()];
        let mut components = Vec::new();

        for start in self.indices() {
            if processed[start as usize] {
                continue;
            }

            let mut component = Vec::new();
            let mut queue = VecDeque::new();
            processed[start as usize] = true;
            queue.push_back(start);

            while let Some(current) = queue.pop_front() {
                component.push(current);
                for &neighbor in self.neighbor_indices(current) {
                    if !processed[neighbor as usize] {
                        processed[neighbor as usize] = true;
                        queue.push_back(neighbor);
                    }
                }
            }

            component.sort_unstable();
            components.push(component);
        }

        components
    }

    /// Partition of node ids into connected components
    pub fn connected_components(&self) -> Vec<Vec<&N>> {
        self.component_indices()
            .into_iter()
            .map(|component| component.into_iter().map(|idx| self.node_id(idx)).collect())
            .collect()
    }

    /// Largest hop distance from the node to any node in its component
    pub fn eccentricity(&self, id: &N) -> Result<usize, GraphError> {
        let idx = self.index_of(id)?;
        let farthest = self.bfs_levels(idx).into_iter().max().unwrap_or(0);
        Ok(farthest.max(0) as usize)
    }

    /// Mean hop distance from the node to the other nodes in its component
    pub fn average_eccentricity(&self, id: &N) -> Result<f64, GraphError> {
        let idx = self.index_of(id)?;
        let (total, count) = self
            .bfs_levels(idx)
            .into_iter()
            .filter(|&level| level > 0)
            .fold((0u64, 0u64), |(total, count), level| (total + level as u64, count + 1));

        if count == 0 {
            return Ok(0.0);
        }
        Ok(total as f64 / count as f64)
    }

    /// Hop distance between every pair of handles, `UNREACHABLE` if disconnected
    pub fn all_pairs_distances(&self) -> Array2<i32> {
        let n = self.node_count();
        let mut distances = Array2::from_elem((n, n), UNREACHABLE);

        for source in self.indices() {
            let levels = self.bfs_levels(source);
            for (target, level) in levels.into_iter().enumerate() {
                distances[[source as usize, target]] = level;
            }
        }

        distances
    }
}
