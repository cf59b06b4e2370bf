//! Knowledge-evaluator stubs.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{CoreError, CoreResult};
use crate::traits::{KnowledgeEvaluator, RawErrorMap};
use crate::types::{CausalGraph, Dataset};

/// Returns a fixed raw error map and counts invocations.
///
/// The call counter backs the short-circuit assertion: when no knowledge
/// is available the evaluator must never be invoked.
pub struct ScriptedKnowledgeEvaluator {
    verdicts: RawErrorMap,
    calls: AtomicUsize,
}

impl ScriptedKnowledgeEvaluator {
    pub fn new(verdicts: RawErrorMap) -> Self {
        Self {
            verdicts,
            calls: AtomicUsize::new(0),
        }
    }

    /// A stub that reports no knowledge-based errors.
    pub fn empty() -> Self {
        Self::new(RawErrorMap::new())
    }

    /// Number of `evaluate` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl KnowledgeEvaluator for ScriptedKnowledgeEvaluator {
    fn evaluate(
        &self,
        _data: &Dataset,
        _full_graph: &CausalGraph,
        _knowledge_docs: &[String],
    ) -> CoreResult<RawErrorMap> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.verdicts.clone())
    }
}

/// Always fails, simulating an unreachable evaluation service.
pub struct FailingKnowledgeEvaluator {
    message: String,
    calls: AtomicUsize,
}

impl FailingKnowledgeEvaluator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `evaluate` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl KnowledgeEvaluator for FailingKnowledgeEvaluator {
    fn evaluate(
        &self,
        _data: &Dataset,
        _full_graph: &CausalGraph,
        _knowledge_docs: &[String],
    ) -> CoreResult<RawErrorMap> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CoreError::KnowledgeService {
            message: self.message.clone(),
        })
    }
}
