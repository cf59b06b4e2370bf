//! Merging of statistics-sourced and knowledge-sourced error maps.

use tracing::debug;

use causal_judge_core::types::EdgeAnnotations;

/// Marker that a knowledge document explicitly declares no knowledge.
const NO_KNOWLEDGE_MARKER: &str = "no knowledge";

/// Whether usable domain knowledge is available.
///
/// False when there are no documents or when the first document contains
/// "no knowledge" case-insensitively; the knowledge evaluator is then not
/// invoked at all, saving an external call.
pub fn knowledge_available(knowledge_docs: &[String]) -> bool {
    match knowledge_docs.first() {
        None => false,
        Some(first) => !first.to_lowercase().contains(NO_KNOWLEDGE_MARKER),
    }
}

/// Combine the two error maps into one edge-level decision.
///
/// On key collision the knowledge verdict wins: domain knowledge overrides
/// statistical disagreement.
pub fn aggregate(errors_stat: EdgeAnnotations, errors_llm: EdgeAnnotations) -> EdgeAnnotations {
    debug!(
        stat = errors_stat.len(),
        llm = errors_llm.len(),
        "aggregating error maps"
    );
    EdgeAnnotations::merge(errors_stat, errors_llm)
}
