//! Stub implementations of the external collaborators, for tests.
//!
//! Deterministic in-process stand-ins for the discovery algorithms and the
//! knowledge evaluator. Gated behind `test-utils` so production code cannot
//! depend on them; downstream crates enable the feature in dev-dependencies.

#[cfg(any(test, feature = "test-utils"))]
mod algorithms;
#[cfg(any(test, feature = "test-utils"))]
mod knowledge;

#[cfg(any(test, feature = "test-utils"))]
pub use algorithms::{FixedGraphAlgorithm, PerturbedGraphAlgorithm, SequenceGraphAlgorithm};
#[cfg(any(test, feature = "test-utils"))]
pub use knowledge::{FailingKnowledgeEvaluator, ScriptedKnowledgeEvaluator};
