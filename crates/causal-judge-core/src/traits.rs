//! Seams to the external collaborators of the Judge.
//!
//! The causal discovery algorithms (PC, FCI, CDNOD, GES, DirectLiNGAM,
//! ICALiNGAM, NOTEARS) and the LLM knowledge evaluator live behind these
//! traits. The judge only depends on the contracts here; deterministic
//! stand-ins for tests are in [`crate::stubs`].

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::CoreResult;
use crate::types::{CausalGraph, Dataset};

/// Hyperparameter name/value pairs forwarded verbatim to an algorithm.
pub type Hyperparameters = Map<String, Value>;

/// Raw error map as returned by the external knowledge evaluator:
/// `"source->target"` keys mapping to verdict strings.
pub type RawErrorMap = HashMap<String, String>;

/// A pluggable causal discovery algorithm.
///
/// Implementations fit a directed graph over the dataset's columns. A
/// failed fit (non-convergence, numerical error) surfaces as
/// [`crate::CoreError::AlgorithmNonConvergence`]; the bootstrap loop
/// tolerates such failures per iteration, every other caller treats them
/// as fatal.
pub trait CausalDiscoveryAlgorithm: Send + Sync {
    /// Algorithm name as selected in the analysis state.
    fn name(&self) -> &str;

    /// Fit a causal graph to the data.
    ///
    /// The returned adjacency matrix follows the dataset's column order;
    /// heterogeneous algorithms may append one extra node for the domain
    /// index column.
    fn fit(&self, data: &Dataset, hyperparameters: &Hyperparameters) -> CoreResult<CausalGraph>;
}

/// The LLM-backed domain-knowledge reviewer.
///
/// Opaque to the judge: given the data, the full-data graph and the
/// knowledge documents, it returns a raw string error map. Keys that do
/// not parse or verdicts other than "Forced"/"Forbidden" are dropped by
/// the caller, not here.
pub trait KnowledgeEvaluator: Send + Sync {
    /// Review the graph against domain knowledge.
    fn evaluate(
        &self,
        data: &Dataset,
        full_graph: &CausalGraph,
        knowledge_docs: &[String],
    ) -> CoreResult<RawErrorMap>;
}
