//! Error types for causal-judge-core.
//!
//! This module defines the central error type [`CoreError`] used throughout
//! the core crate, along with the [`CoreResult<T>`] type alias.

use thiserror::Error;

/// Top-level error type for core operations.
///
/// Provides structured error variants for all failure modes in the core
/// library, enabling precise error handling and informative error messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An edge key references a column that does not exist in the dataset.
    ///
    /// # When This Occurs
    ///
    /// - A knowledge verdict names a variable absent from the data
    /// - A bootstrap error map was built against a different dataset
    ///
    /// This error is fatal: revision cannot proceed with an unresolvable key.
    #[error("Unknown column: {name}")]
    UnknownColumn {
        /// The column name that failed to resolve
        name: String,
    },

    /// Two graphs being compared do not have compatible dimensions.
    ///
    /// # When This Occurs
    ///
    /// - Estimated graph and ground truth differ by more than one node
    /// - A revision targets an index outside the adjacency matrix
    ///
    /// A difference of exactly one node is handled by the domain-index
    /// heuristic in [`crate::metrics::evaluate`] and does not raise this.
    #[error("Shape mismatch: expected {expected} nodes, got {actual}")]
    ShapeMismatch {
        /// Expected number of nodes
        expected: usize,
        /// Actual number of nodes
        actual: usize,
    },

    /// A classification metric is undefined for the given inputs.
    ///
    /// # When This Occurs
    ///
    /// - Both the estimated graph and the ground truth contain no edges,
    ///   leaving precision and recall without a defined value
    ///
    /// Surfaced explicitly rather than silently reported as zero.
    #[error("Degenerate metric: {reason}")]
    DegenerateMetric {
        /// Why the metric is undefined
        reason: String,
    },

    /// A field value failed validation constraints.
    ///
    /// # When This Occurs
    ///
    /// - Duplicate or missing column names when building a dataset
    /// - A non-square or non-binary adjacency matrix
    /// - An edge key without a `->` separator
    #[error("Validation error: {field} - {message}")]
    ValidationError {
        /// Name of the field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },

    /// A causal discovery algorithm failed to converge on the given data.
    ///
    /// Recovered per iteration inside the bootstrap loop; fatal anywhere else.
    #[error("Algorithm {algorithm} did not converge: {message}")]
    AlgorithmNonConvergence {
        /// Name of the algorithm that failed
        algorithm: String,
        /// Algorithm-specific failure description
        message: String,
    },

    /// The external knowledge evaluation service failed.
    ///
    /// # When This Occurs
    ///
    /// - Network failure or timeout reaching the LLM backend
    /// - Malformed response from the evaluation service
    ///
    /// The Judge recovers this as an empty knowledge error map with a
    /// surfaced warning; callers invoking the evaluator directly see it raw.
    #[error("Knowledge service error: {message}")]
    KnowledgeService {
        /// Description of the service failure
        message: String,
    },

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::SerializationError(err.to_string())
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::ConfigError(err.to_string())
    }
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
