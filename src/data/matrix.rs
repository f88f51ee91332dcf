//! Compatibility matrix handling

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use ndarray::Array2;

use crate::error::GraphError;
use crate::graph::Graph;

/// Square matrix of pairwise compatibility scores between labelled entities
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityMatrix {
    /// Row (and column) labels in file order
    pub labels: Vec<String>,

    /// scores[[i, j]] is the compatibility of labels[i] with labels[j]
    pub scores: Array2<f64>,
}

impl CompatibilityMatrix {
    /// Parse tab-separated rows of `label<TAB>score...`, one row per entity
    ///
    /// Every row must hold one score per row in the file. Blank lines are
    /// skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut labels = Vec::new();
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut seen = HashSet::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split('\t');
            let label = fields
                .next()
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .ok_or_else(|| anyhow!("Line {} has no label", line_no + 1))?;

            if !seen.insert(label.to_string()) {
                bail!("Duplicate label {} on line {}", label, line_no + 1);
            }

            let row = fields
                .map(|field| {
                    field.trim().parse::<f64>().with_context(|| {
                        format!("Invalid score {:?} for {} on line {}", field, label, line_no + 1)
                    })
                })
                .collect::<Result<Vec<f64>>>()?;

            labels.push(label.to_string());
            rows.push(row);
        }

        let n = labels.len();
        for (label, row) in labels.iter().zip(&rows) {
            if row.len() != n {
                bail!("Row {} has {} scores, expected {}", label, row.len(), n);
            }
        }

        let scores = Array2::from_shape_vec((n, n), rows.into_iter().flatten().collect())
            .context("Failed to shape compatibility matrix")?;

        Ok(Self { labels, scores })
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether the pair (i, j) is compatible; only the upper triangle is read
    pub fn is_compatible(&self, i: usize, j: usize) -> bool {
        let (row, col) = if i < j { (i, j) } else { (j, i) };
        row != col && self.scores[[row, col]] > 0.0
    }

    /// Fraction of entity pairs that are compatible
    pub fn edge_fraction(&self) -> f64 {
        let n = self.len();
        if n < 2 {
            return 0.0;
        }

        let links = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.is_compatible(i, j))
            .count();
        links as f64 / (n * (n - 1) / 2) as f64
    }

    /// Build the compatibility graph: one node per label, an edge per positive score
    pub fn to_graph(&self) -> Result<Graph<String>, GraphError> {
        let n = self.len();
        let mut graph = Graph::with_capacity(n);
        for label in &self.labels {
            graph.add_node(label.clone())?;
        }

        for i in 0..n {
            for j in i + 1..n {
                if self.is_compatible(i, j) {
                    graph.add_edge(&self.labels[i], &self.labels[j])?;
                }
            }
        }

        log::info!(
            "Built compatibility graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        log::info!("Fraction of edges: {:.2}", self.edge_fraction());

        Ok(graph)
    }
}

/// Load a compatibility matrix from a tab-separated file
pub fn load_compatibility_matrix(path: &str) -> Result<CompatibilityMatrix> {
    log::info!("Reading compatibility matrix: {}", path);

    if !Path::new(path).exists() {
        return Err(anyhow!("File not found: {}", path));
    }

    let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
    let matrix = CompatibilityMatrix::from_reader(BufReader::new(file))
        .with_context(|| format!("Malformed compatibility matrix {}", path))?;

    log::info!("Loaded {}x{} compatibility matrix", matrix.len(), matrix.len());

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIAMOND: &str = "A\t0\t1\t1\t0\n\
                           B\t1\t0\t1\t0\n\
                           C\t1\t1\t0\t2.5\n\
                           D\t0\t0\t2.5\t0\n";

    #[test]
    fn parses_square_matrix_into_graph() {
        let matrix = CompatibilityMatrix::from_reader(DIAMOND.as_bytes()).unwrap();
        assert_eq!(matrix.labels, vec!["A", "B", "C", "D"]);
        assert_eq!(matrix.scores[[2, 3]], 2.5);

        let graph = matrix.to_graph().unwrap();
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.degree(&"C".to_string()).unwrap(), 3);
        assert!((matrix.edge_fraction() - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn only_the_upper_triangle_is_read() {
        let input = "x\t0\t0\ny\t5\t0\n";
        let matrix = CompatibilityMatrix::from_reader(input.as_bytes()).unwrap();
        assert!(!matrix.is_compatible(0, 1));
        assert_eq!(matrix.to_graph().unwrap().edge_count(), 0);
    }

    #[test]
    fn negative_and_zero_scores_are_not_edges() {
        let input = "x\t0\t-1\ny\t-1\t0\n";
        let matrix = CompatibilityMatrix::from_reader(input.as_bytes()).unwrap();
        assert_eq!(matrix.to_graph().unwrap().edge_count(), 0);
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(CompatibilityMatrix::from_reader("a\t0\tx\nb\t1\t0\n".as_bytes()).is_err());
        assert!(CompatibilityMatrix::from_reader("a\t0\t1\nb\t1\n".as_bytes()).is_err());
        assert!(CompatibilityMatrix::from_reader("a\t0\t1\na\t1\t0\n".as_bytes()).is_err());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let matrix = CompatibilityMatrix::from_reader("a\t0\n\n".as_bytes()).unwrap();
        assert_eq!(matrix.len(), 1);
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(load_compatibility_matrix("/nonexistent/matrix.tsv").is_err());
    }
}
