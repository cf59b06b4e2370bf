//! Adjacency matrix representation of a directed causal graph.
//!
//! Convention inherited from the discovery algorithms: `matrix[(j, i)] = 1`
//! means variable `i` causes variable `j` (the edge i -> j is stored at row
//! `j`, column `i`). The diagonal is zero; nothing enforces that after
//! construction, so revision logic must preserve it.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A directed causal graph over indexed variables, stored as a square
/// binary adjacency matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalGraph {
    matrix: DMatrix<u8>,
}

impl CausalGraph {
    /// An edgeless graph over `n` variables.
    pub fn zeros(n: usize) -> Self {
        Self {
            matrix: DMatrix::zeros(n, n),
        }
    }

    /// Wrap an existing adjacency matrix.
    ///
    /// Fails when the matrix is not square or contains entries outside {0, 1}.
    pub fn from_matrix(matrix: DMatrix<u8>) -> CoreResult<Self> {
        if matrix.nrows() != matrix.ncols() {
            return Err(CoreError::ValidationError {
                field: "matrix".to_string(),
                message: format!("not square: {}x{}", matrix.nrows(), matrix.ncols()),
            });
        }
        if matrix.iter().any(|&v| v > 1) {
            return Err(CoreError::ValidationError {
                field: "matrix".to_string(),
                message: "entries must be 0 or 1".to_string(),
            });
        }
        Ok(Self { matrix })
    }

    /// Build from a row-major slice of 0/1 entries.
    pub fn from_row_slice(n: usize, entries: &[u8]) -> CoreResult<Self> {
        if entries.len() != n * n {
            return Err(CoreError::ValidationError {
                field: "entries".to_string(),
                message: format!("expected {} entries, got {}", n * n, entries.len()),
            });
        }
        Self::from_matrix(DMatrix::from_row_slice(n, n, entries))
    }

    /// Number of variables.
    pub fn n_nodes(&self) -> usize {
        self.matrix.nrows()
    }

    /// Whether the directed edge `source -> target` is present.
    pub fn has_edge(&self, source: usize, target: usize) -> bool {
        self.matrix[(target, source)] == 1
    }

    /// Insert the directed edge `source -> target`.
    pub fn set_edge(&mut self, source: usize, target: usize) {
        self.matrix[(target, source)] = 1;
    }

    /// Remove the directed edge `source -> target`.
    pub fn clear_edge(&mut self, source: usize, target: usize) {
        self.matrix[(target, source)] = 0;
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.matrix.iter().filter(|&&v| v == 1).count()
    }

    /// The underlying adjacency matrix.
    pub fn matrix(&self) -> &DMatrix<u8> {
        &self.matrix
    }

    /// The adjacency matrix as `f64`, for accumulation.
    pub fn to_f64(&self) -> DMatrix<f64> {
        self.matrix.map(|v| v as f64)
    }

    /// Drop the last row and column, shrinking the graph by one node.
    ///
    /// Used by the metrics evaluator when an appended domain-index column
    /// gave the estimated graph one extra dimension.
    pub fn drop_last_node(&self) -> CausalGraph {
        let n = self.n_nodes().saturating_sub(1);
        CausalGraph {
            matrix: self.matrix.view((0, 0), (n, n)).into_owned(),
        }
    }
}

/// Per-edge bootstrap stability: the fraction of bootstrap runs in which
/// each directed edge appeared, in `[0, 1]`. Same orientation convention
/// as [`CausalGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapProbability {
    matrix: DMatrix<f64>,
}

impl BootstrapProbability {
    /// Wrap a probability matrix.
    ///
    /// Fails when the matrix is not square or has entries outside `[0, 1]`.
    pub fn from_matrix(matrix: DMatrix<f64>) -> CoreResult<Self> {
        if matrix.nrows() != matrix.ncols() {
            return Err(CoreError::ValidationError {
                field: "matrix".to_string(),
                message: format!("not square: {}x{}", matrix.nrows(), matrix.ncols()),
            });
        }
        if matrix.iter().any(|&v| !(0.0..=1.0).contains(&v)) {
            return Err(CoreError::ValidationError {
                field: "matrix".to_string(),
                message: "probabilities must lie in [0, 1]".to_string(),
            });
        }
        Ok(Self { matrix })
    }

    /// Number of variables.
    pub fn n_nodes(&self) -> usize {
        self.matrix.nrows()
    }

    /// Probability that the directed edge `source -> target` appears.
    pub fn edge_probability(&self, source: usize, target: usize) -> f64 {
        self.matrix[(target, source)]
    }

    /// The underlying probability matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_orientation() {
        // Edge X(0) -> Y(1) lives at row 1, column 0.
        let mut graph = CausalGraph::zeros(3);
        graph.set_edge(0, 1);
        assert!(graph.has_edge(0, 1));
        assert!(!graph.has_edge(1, 0));
        assert_eq!(graph.matrix()[(1, 0)], 1);
        assert_eq!(graph.matrix()[(0, 1)], 0);

        graph.clear_edge(0, 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_from_matrix_rejects_non_square() {
        let err = CausalGraph::from_matrix(DMatrix::zeros(2, 3)).unwrap_err();
        assert!(err.to_string().contains("not square"));
    }

    #[test]
    fn test_from_matrix_rejects_non_binary() {
        let matrix = DMatrix::from_row_slice(2, 2, &[0u8, 2, 0, 0]);
        assert!(CausalGraph::from_matrix(matrix).is_err());
    }

    #[test]
    fn test_drop_last_node() {
        let graph = CausalGraph::from_row_slice(3, &[0, 0, 1, 1, 0, 1, 1, 1, 0]).unwrap();
        let cropped = graph.drop_last_node();
        assert_eq!(cropped.n_nodes(), 2);
        assert!(cropped.has_edge(0, 1));
        assert!(!cropped.has_edge(1, 0));
    }

    #[test]
    fn test_probability_bounds_checked() {
        let ok = DMatrix::from_row_slice(2, 2, &[0.0, 0.5, 1.0, 0.25]);
        assert!(BootstrapProbability::from_matrix(ok).is_ok());

        let bad = DMatrix::from_row_slice(2, 2, &[0.0, 1.5, 0.0, 0.0]);
        assert!(BootstrapProbability::from_matrix(bad).is_err());
    }
}
