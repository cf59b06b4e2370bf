//! Tabular dataset with ordered, named columns.
//!
//! Column order defines the index mapping used by adjacency matrices:
//! column `i` of the dataset corresponds to row/column `i` of the matrix.

use nalgebra::DMatrix;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};

/// A tabular dataset: ordered named columns over a numeric value block.
///
/// Rows are independent observations (or time points when the data is a
/// time series). The column order is load-bearing; reordering columns
/// invalidates every adjacency matrix derived from the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Ordered column names. `columns[i]` labels matrix row/column `i`.
    columns: Vec<String>,

    /// Numeric value block, `n_rows x n_cols`.
    values: DMatrix<f64>,
}

impl Dataset {
    /// Build a dataset from column names and a value block.
    ///
    /// Fails when the column count does not match the matrix width or when
    /// column names are duplicated or empty.
    pub fn new(columns: Vec<String>, values: DMatrix<f64>) -> CoreResult<Self> {
        if columns.len() != values.ncols() {
            return Err(CoreError::ValidationError {
                field: "columns".to_string(),
                message: format!(
                    "{} column names for a {}-column value block",
                    columns.len(),
                    values.ncols()
                ),
            });
        }

        let mut seen = HashSet::new();
        for name in &columns {
            if name.is_empty() {
                return Err(CoreError::ValidationError {
                    field: "columns".to_string(),
                    message: "empty column name".to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(CoreError::ValidationError {
                    field: "columns".to_string(),
                    message: format!("duplicate column name: {}", name),
                });
            }
        }

        Ok(Self { columns, values })
    }

    /// Number of observations.
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of variables.
    pub fn n_cols(&self) -> usize {
        self.values.ncols()
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Numeric value block.
    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Draw an i.i.d. row resample with replacement, same row count.
    ///
    /// Used by the bootstrap on cross-sectional data.
    pub fn resample_iid<R: Rng>(&self, rng: &mut R) -> Dataset {
        let n = self.n_rows();
        let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        self.select_rows(&indices)
    }

    /// Draw a moving-block resample for time-series data.
    ///
    /// Blocks of `block_len` consecutive rows (wrapping around the end) are
    /// drawn with replacement until the original row count is reached, then
    /// truncated. Preserves short-range serial dependence within blocks.
    pub fn resample_blocks<R: Rng>(&self, rng: &mut R, block_len: usize) -> Dataset {
        let n = self.n_rows();
        let block_len = block_len.max(1);
        let mut indices = Vec::with_capacity(n + block_len);
        while indices.len() < n {
            let start = rng.gen_range(0..n);
            for k in 0..block_len {
                indices.push((start + k) % n);
            }
        }
        indices.truncate(n);
        self.select_rows(&indices)
    }

    fn select_rows(&self, indices: &[usize]) -> Dataset {
        let values = DMatrix::from_fn(indices.len(), self.n_cols(), |r, c| {
            self.values[(indices[r], c)]
        });
        Dataset {
            columns: self.columns.clone(),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn make_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn sample_dataset() -> Dataset {
        // 6 rows, 3 columns; each row has a distinct value so resampled
        // rows can be traced back to their origin.
        let values = DMatrix::from_fn(6, 3, |r, c| (r * 10 + c) as f64);
        Dataset::new(
            vec!["X".to_string(), "Y".to_string(), "Z".to_string()],
            values,
        )
        .unwrap()
    }

    #[test]
    fn test_column_index() {
        let data = sample_dataset();
        assert_eq!(data.column_index("X"), Some(0));
        assert_eq!(data.column_index("Z"), Some(2));
        assert_eq!(data.column_index("W"), None);
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let values = DMatrix::zeros(2, 2);
        let err = Dataset::new(vec!["A".to_string(), "A".to_string()], values).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rejects_width_mismatch() {
        let values = DMatrix::zeros(2, 3);
        assert!(Dataset::new(vec!["A".to_string(), "B".to_string()], values).is_err());
    }

    #[test]
    fn test_resample_iid_shape_and_provenance() {
        let data = sample_dataset();
        let mut rng = make_rng();
        let resampled = data.resample_iid(&mut rng);

        assert_eq!(resampled.n_rows(), data.n_rows());
        assert_eq!(resampled.n_cols(), data.n_cols());
        assert_eq!(resampled.columns(), data.columns());

        // Every resampled row must be one of the original rows.
        for r in 0..resampled.n_rows() {
            let first = resampled.values()[(r, 0)];
            let origin = (first / 10.0) as usize;
            assert!(origin < data.n_rows());
            for c in 0..resampled.n_cols() {
                assert_eq!(resampled.values()[(r, c)], data.values()[(origin, c)]);
            }
        }
    }

    #[test]
    fn test_resample_blocks_keeps_contiguity() {
        let data = sample_dataset();
        let mut rng = make_rng();
        let block_len = 3;
        let resampled = data.resample_blocks(&mut rng, block_len);

        assert_eq!(resampled.n_rows(), data.n_rows());

        // Within each block, consecutive rows come from consecutive
        // (mod n) original rows.
        let origins: Vec<usize> = (0..resampled.n_rows())
            .map(|r| (resampled.values()[(r, 0)] / 10.0) as usize)
            .collect();
        for (pos, window) in origins.windows(2).enumerate() {
            if (pos + 1) % block_len != 0 {
                assert_eq!(window[1], (window[0] + 1) % data.n_rows());
            }
        }
    }

    #[test]
    fn test_resample_is_seeded_deterministic() {
        let data = sample_dataset();
        let a = data.resample_iid(&mut make_rng());
        let b = data.resample_iid(&mut make_rng());
        assert_eq!(a.values(), b.values());
    }
}
