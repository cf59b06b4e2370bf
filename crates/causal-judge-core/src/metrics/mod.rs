//! Graph evaluation metrics against ground truth.
//!
//! Compares two adjacency matrices cell by cell over their flattened
//! directed entries, producing SHD and binary-classification metrics with
//! the ground truth as labels and the estimated graph as predictions.
//!
//! The SHD computed here is the flattened-difference form: a reversed edge
//! differs from the truth in two cells (a false positive and a false
//! negative) and therefore contributes 2, unlike the classical
//! undirected-skeleton SHD where a reversal counts once.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::types::CausalGraph;

/// Evaluation metrics for an estimated graph against ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphMetrics {
    /// Structural Hamming distance over flattened directed entries.
    pub shd: u32,
    /// Fraction of predicted edges that exist in the truth.
    pub precision: f64,
    /// Fraction of true edges that were predicted.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
}

/// Compare an estimated graph to ground truth.
///
/// # Alignment
///
/// When the estimated graph has exactly one more node than the truth, its
/// last row and column are dropped first: discovery on heterogeneous data
/// appends the domain-index column as an extra node. Any other size
/// difference is a [`CoreError::ShapeMismatch`] rather than a silently
/// misaligned comparison.
///
/// # Degenerate inputs
///
/// When neither graph contains any edge, precision and recall are
/// undefined and [`CoreError::DegenerateMetric`] is returned. When only
/// one side is empty the affected metric degrades to 0.0 with a logged
/// warning, matching the behavior of common metric libraries.
pub fn evaluate(est_graph: &CausalGraph, ground_truth: &CausalGraph) -> CoreResult<GraphMetrics> {
    let aligned;
    let est = if est_graph.n_nodes() == ground_truth.n_nodes() + 1 {
        debug!(
            est_nodes = est_graph.n_nodes(),
            truth_nodes = ground_truth.n_nodes(),
            "dropping trailing domain-index node before comparison"
        );
        aligned = est_graph.drop_last_node();
        &aligned
    } else {
        est_graph
    };

    if est.n_nodes() != ground_truth.n_nodes() {
        return Err(CoreError::ShapeMismatch {
            expected: ground_truth.n_nodes(),
            actual: est.n_nodes(),
        });
    }

    let mut tp = 0u32;
    let mut fp = 0u32;
    let mut fn_ = 0u32;
    for (pred, label) in est.matrix().iter().zip(ground_truth.matrix().iter()) {
        match (*pred, *label) {
            (1, 1) => tp += 1,
            (1, 0) => fp += 1,
            (0, 1) => fn_ += 1,
            _ => {}
        }
    }

    let predicted_positives = tp + fp;
    let actual_positives = tp + fn_;
    if predicted_positives == 0 && actual_positives == 0 {
        return Err(CoreError::DegenerateMetric {
            reason: "no edges in either graph; precision and recall are undefined".to_string(),
        });
    }

    let precision = if predicted_positives == 0 {
        warn!("no predicted edges; precision degrades to 0.0");
        0.0
    } else {
        tp as f64 / predicted_positives as f64
    };
    let recall = if actual_positives == 0 {
        warn!("no true edges; recall degrades to 0.0");
        0.0
    } else {
        tp as f64 / actual_positives as f64
    };
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };

    Ok(GraphMetrics {
        shd: fp + fn_,
        precision,
        recall,
        f1,
    })
}
