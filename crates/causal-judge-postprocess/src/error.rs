//! Error types for the judge pipeline.

use thiserror::Error;

use causal_judge_core::CoreError;

/// Result type for judge pipeline operations.
pub type JudgeResult<T> = Result<T, JudgeError>;

/// Errors that can occur in the judge pipeline.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// An argument violated the contract of an operation.
    #[error("Invalid argument {argument}: {message}")]
    InvalidArgument {
        /// Name of the offending argument
        argument: String,
        /// Description of the violation
        message: String,
    },

    /// Every bootstrap iteration failed or was cut off by the deadline,
    /// leaving no denominator for the probability estimate.
    #[error("All {attempted} bootstrap iterations failed or were skipped")]
    AllIterationsFailed {
        /// Number of iterations that were attempted
        attempted: usize,
    },

    /// A core-level failure (unknown column, shape mismatch, ...).
    #[error(transparent)]
    Core(#[from] CoreError),
}
