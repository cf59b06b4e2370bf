//! Causal Judge Core Library
//!
//! Domain types, collaborator traits and evaluation metrics for judging the
//! quality of causal discovery results.
//!
//! # Architecture
//!
//! This crate defines:
//! - Domain types ([`types::Dataset`], [`types::CausalGraph`],
//!   [`types::EdgeAnnotations`], [`types::GlobalState`], ...)
//! - Collaborator traits ([`traits::CausalDiscoveryAlgorithm`],
//!   [`traits::KnowledgeEvaluator`])
//! - Error types and result aliases
//! - Configuration structures
//! - Ground-truth metrics ([`metrics::evaluate`])
//!
//! The judge pipeline itself (bootstrap evaluation, error aggregation,
//! graph revision, orchestration) lives in `causal-judge-postprocess`.
//!
//! # Example
//!
//! ```
//! use causal_judge_core::types::{CausalGraph, EdgeKey};
//!
//! let mut graph = CausalGraph::zeros(3);
//! graph.set_edge(0, 1); // X -> Y stored at row 1, column 0
//! assert!(graph.has_edge(0, 1));
//!
//! let key: EdgeKey = "X->Y".parse().unwrap();
//! assert_eq!(key.source(), "X");
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod stubs;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use config::JudgeSettings;
pub use error::{CoreError, CoreResult};
pub use metrics::GraphMetrics;
