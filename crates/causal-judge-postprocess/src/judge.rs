//! The Judge: orchestrates bootstrap evaluation, knowledge review, error
//! aggregation and graph revision.
//!
//! Ownership boundary: [`Judge::forward`] is the only writer of the four
//! judge result fields on [`GlobalState`]; every other component sees the
//! state read-only.

use std::sync::Arc;

use tracing::{info, warn};

use causal_judge_core::config::JudgeSettings;
use causal_judge_core::traits::{CausalDiscoveryAlgorithm, Hyperparameters, KnowledgeEvaluator};
use causal_judge_core::types::{
    BootstrapProbability, CausalGraph, Dataset, EdgeAnnotations, GlobalState,
};

use crate::aggregate::{aggregate, knowledge_available};
use crate::bootstrap::{BootstrapConfig, BootstrapEvaluator};
use crate::error::{JudgeError, JudgeResult};
use crate::revise::revise;

/// Everything the Judge writes back onto the state.
#[derive(Debug, Clone)]
pub struct JudgeOutcome {
    /// Knowledge-sourced error map (empty when no knowledge was available
    /// or the service failed).
    pub llm_errors: EdgeAnnotations,

    /// Statistics-sourced error map.
    pub bootstrap_errors: EdgeAnnotations,

    /// Per-edge bootstrap stability.
    pub bootstrap_probability: BootstrapProbability,

    /// Graph after applying the combined error map.
    pub revised_graph: CausalGraph,
}

/// Judges the quality of a discovered causal graph from the statistical
/// and the domain-knowledge perspective, then revises it.
pub struct Judge {
    algorithm: Arc<dyn CausalDiscoveryAlgorithm>,
    knowledge: Arc<dyn KnowledgeEvaluator>,
    bootstrap: BootstrapEvaluator,
    knowledge_enabled: bool,
}

impl Judge {
    /// Build a judge around the selected algorithm and knowledge evaluator.
    pub fn new(
        algorithm: Arc<dyn CausalDiscoveryAlgorithm>,
        knowledge: Arc<dyn KnowledgeEvaluator>,
        settings: &JudgeSettings,
    ) -> Self {
        Self {
            algorithm,
            knowledge,
            bootstrap: BootstrapEvaluator::new(BootstrapConfig::from(&settings.bootstrap)),
            knowledge_enabled: settings.knowledge.enabled,
        }
    }

    /// Build with an explicit bootstrap configuration.
    pub fn with_bootstrap_config(
        algorithm: Arc<dyn CausalDiscoveryAlgorithm>,
        knowledge: Arc<dyn KnowledgeEvaluator>,
        config: BootstrapConfig,
    ) -> Self {
        Self {
            algorithm,
            knowledge,
            bootstrap: BootstrapEvaluator::new(config),
            knowledge_enabled: true,
        }
    }

    /// Judge the quality of `full_graph` and produce a revised graph.
    ///
    /// The bootstrap always runs; the knowledge evaluator runs only when
    /// domain knowledge is actually available. A knowledge-service failure
    /// degrades to statistics-only revision with a surfaced warning;
    /// bootstrap failures propagate.
    pub fn quality_judge(
        &self,
        data: &Dataset,
        full_graph: &CausalGraph,
        hyperparameters: &Hyperparameters,
        knowledge_docs: &[String],
    ) -> JudgeResult<JudgeOutcome> {
        // Statistics perspective: edge stability under resampling.
        let boot = self
            .bootstrap
            .run(data, full_graph, self.algorithm.as_ref(), hyperparameters)?;

        // Knowledge perspective: domain-knowledge review, short-circuited
        // when there is nothing to review against.
        let llm_errors = if self.knowledge_enabled && knowledge_available(knowledge_docs) {
            match self.knowledge.evaluate(data, full_graph, knowledge_docs) {
                Ok(raw) => EdgeAnnotations::from_raw(raw),
                Err(err) => {
                    warn!(%err, "knowledge evaluation failed; continuing with statistics only");
                    EdgeAnnotations::new()
                }
            }
        } else {
            info!("no domain knowledge available; skipping knowledge evaluation");
            EdgeAnnotations::new()
        };

        let errors = aggregate(boot.errors_stat.clone(), llm_errors.clone());
        let revised_graph = revise(full_graph, &errors, data)?;

        info!(
            bootstrap_errors = boot.errors_stat.len(),
            llm_errors = llm_errors.len(),
            combined = errors.len(),
            "quality judgement complete"
        );

        Ok(JudgeOutcome {
            llm_errors,
            bootstrap_errors: boot.errors_stat,
            bootstrap_probability: boot.probability,
            revised_graph,
        })
    }

    /// Run the judge against a shared analysis state.
    ///
    /// Reads the processed data, the converted graph, the algorithm
    /// arguments and the knowledge documents; writes exactly the four
    /// judge result fields.
    pub fn forward(&self, state: &mut GlobalState) -> JudgeResult<()> {
        let full_graph = state.results.converted_graph.as_ref().ok_or_else(|| {
            JudgeError::InvalidArgument {
                argument: "results.converted_graph".to_string(),
                message: "no discovered graph to judge".to_string(),
            }
        })?;

        if state.algorithm.selected_algorithm != self.algorithm.name() {
            warn!(
                selected = state.algorithm.selected_algorithm,
                runner = self.algorithm.name(),
                "state selects a different algorithm than the configured runner"
            );
        }

        // The bootstrap runs with the judge's own configuration; the state
        // statistics are advisory, like `selected_algorithm`.
        let config = self.bootstrap.config();
        if state.statistics.boot_num != config.boot_num {
            warn!(
                state_boot_num = state.statistics.boot_num,
                configured = config.boot_num,
                "state requests a different bootstrap iteration count than configured"
            );
        }
        if state.statistics.time_series != config.time_series {
            warn!(
                state_time_series = state.statistics.time_series,
                configured = config.time_series,
                "state disagrees with the configured resampling scheme"
            );
        }

        let outcome = self.quality_judge(
            &state.user_data.processed_data,
            full_graph,
            &state.algorithm.algorithm_arguments,
            &state.user_data.knowledge_docs,
        )?;

        state.results.llm_errors = outcome.llm_errors;
        state.results.bootstrap_errors = outcome.bootstrap_errors;
        state.results.bootstrap_probability = Some(outcome.bootstrap_probability);
        state.results.revised_graph = Some(outcome.revised_graph);
        Ok(())
    }
}
