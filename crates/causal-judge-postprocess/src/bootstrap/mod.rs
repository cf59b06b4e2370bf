//! Bootstrap resampling edge-probability estimator.
//!
//! Re-runs the selected discovery algorithm on resampled data and compares
//! each bootstrap graph to the full-data graph, accumulating per-edge
//! presence counts. Iterations are independent and run on the rayon pool;
//! per-iteration results are merged in a reduction step after the join, so
//! no shared accumulator is locked during the runs.
//!
//! # Failure policy
//!
//! A failed fit (non-convergence, numerical error) is caught, logged and
//! **excluded from the denominator**: probabilities are fractions of
//! *completed* runs. The run as a whole only fails when no iteration
//! completes at all.
//!
//! # Verdict thresholds
//!
//! An edge present in the full graph whose bootstrap probability falls
//! strictly below `forbidden_below` (default 0.1) is flagged `Forbidden`;
//! an edge absent from the full graph whose probability rises strictly
//! above `forced_above` (default 0.9) is flagged `Forced`. A probability
//! of exactly 0.5 therefore never flags anything.

use std::time::{Duration, Instant};

use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use causal_judge_core::config::BootstrapSettings;
use causal_judge_core::traits::{CausalDiscoveryAlgorithm, Hyperparameters};
use causal_judge_core::types::{
    BootstrapProbability, CausalGraph, Dataset, EdgeAnnotations, EdgeKey, Verdict,
};

use crate::error::{JudgeError, JudgeResult};

/// Runtime configuration for the bootstrap evaluator.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Number of bootstrap iterations. Must be at least 1.
    pub boot_num: usize,

    /// Whether to use block resampling (time-series data).
    pub time_series: bool,

    /// Block length for the moving-block resampler.
    pub block_len: usize,

    /// Flag a full-graph edge as Forbidden below this probability.
    pub forbidden_below: f64,

    /// Flag an absent edge as Forced above this probability.
    pub forced_above: f64,

    /// Base seed; iteration `i` uses `seed + i`.
    pub seed: u64,

    /// Wall-clock budget. Once exceeded, no further iterations launch and
    /// statistics come from the iterations completed so far.
    pub deadline: Option<Duration>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self::from(&BootstrapSettings::default())
    }
}

impl From<&BootstrapSettings> for BootstrapConfig {
    fn from(settings: &BootstrapSettings) -> Self {
        Self {
            boot_num: settings.boot_num,
            time_series: settings.time_series,
            block_len: settings.block_len,
            forbidden_below: settings.forbidden_below,
            forced_above: settings.forced_above,
            seed: settings.seed,
            deadline: settings.deadline_secs.map(Duration::from_secs),
        }
    }
}

/// Outcome of a bootstrap evaluation.
#[derive(Debug, Clone)]
pub struct BootstrapOutcome {
    /// Statistics-sourced error map.
    pub errors_stat: EdgeAnnotations,

    /// Per-edge fraction of completed runs containing the edge.
    pub probability: BootstrapProbability,

    /// Iterations that produced a usable graph.
    pub completed: usize,

    /// Iterations that failed or were cut off by the deadline.
    pub failed: usize,
}

enum Iteration {
    Completed(DMatrix<f64>),
    Failed,
    Skipped,
}

/// Bootstrap resampling evaluator.
pub struct BootstrapEvaluator {
    config: BootstrapConfig,
}

impl BootstrapEvaluator {
    pub fn new(config: BootstrapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Estimate per-edge stability of `full_graph` under resampling.
    ///
    /// Does not mutate `data` or `full_graph`. Fails with
    /// [`JudgeError::InvalidArgument`] when `boot_num` is zero and with
    /// [`JudgeError::AllIterationsFailed`] when no iteration completes.
    pub fn run(
        &self,
        data: &Dataset,
        full_graph: &CausalGraph,
        algorithm: &dyn CausalDiscoveryAlgorithm,
        hyperparameters: &Hyperparameters,
    ) -> JudgeResult<BootstrapOutcome> {
        if self.config.boot_num == 0 {
            return Err(JudgeError::InvalidArgument {
                argument: "boot_num".to_string(),
                message: "at least one bootstrap iteration is required".to_string(),
            });
        }

        let n = full_graph.n_nodes();
        let start = Instant::now();
        info!(
            algorithm = algorithm.name(),
            boot_num = self.config.boot_num,
            time_series = self.config.time_series,
            "starting bootstrap evaluation"
        );

        let iterations: Vec<Iteration> = (0..self.config.boot_num)
            .into_par_iter()
            .map(|iter| self.run_iteration(iter, data, n, algorithm, hyperparameters, start))
            .collect();

        let mut presence = DMatrix::<f64>::zeros(n, n);
        let mut completed = 0usize;
        let mut failed = 0usize;
        for iteration in iterations {
            match iteration {
                Iteration::Completed(matrix) => {
                    presence += matrix;
                    completed += 1;
                }
                Iteration::Failed | Iteration::Skipped => failed += 1,
            }
        }

        if completed == 0 {
            return Err(JudgeError::AllIterationsFailed {
                attempted: self.config.boot_num,
            });
        }
        if failed > 0 {
            warn!(
                completed,
                failed, "bootstrap finished with failed or skipped iterations"
            );
        }

        let probability = presence.map(|count| count / completed as f64);
        let errors_stat = self.derive_errors(data, full_graph, &probability);
        info!(
            completed,
            failed,
            flagged = errors_stat.len(),
            "bootstrap evaluation finished"
        );

        Ok(BootstrapOutcome {
            errors_stat,
            probability: BootstrapProbability::from_matrix(probability)
                .map_err(JudgeError::Core)?,
            completed,
            failed,
        })
    }

    fn run_iteration(
        &self,
        iter: usize,
        data: &Dataset,
        n_nodes: usize,
        algorithm: &dyn CausalDiscoveryAlgorithm,
        hyperparameters: &Hyperparameters,
        start: Instant,
    ) -> Iteration {
        if let Some(deadline) = self.config.deadline {
            if start.elapsed() >= deadline {
                debug!(iteration = iter, "deadline reached; iteration not launched");
                return Iteration::Skipped;
            }
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(iter as u64));
        let resample = if self.config.time_series {
            data.resample_blocks(&mut rng, self.config.block_len)
        } else {
            data.resample_iid(&mut rng)
        };

        match algorithm.fit(&resample, hyperparameters) {
            Ok(graph) if graph.n_nodes() == n_nodes => Iteration::Completed(graph.to_f64()),
            Ok(graph) => {
                warn!(
                    iteration = iter,
                    expected = n_nodes,
                    actual = graph.n_nodes(),
                    "bootstrap graph has wrong dimension; iteration discarded"
                );
                Iteration::Failed
            }
            Err(err) => {
                warn!(iteration = iter, %err, "bootstrap iteration failed");
                Iteration::Failed
            }
        }
    }

    /// Flag edges whose bootstrap probability sharply contradicts the
    /// full-graph decision.
    ///
    /// Nodes beyond the dataset's columns (an appended domain index) have
    /// no name to key an annotation with and are skipped.
    fn derive_errors(
        &self,
        data: &Dataset,
        full_graph: &CausalGraph,
        probability: &DMatrix<f64>,
    ) -> EdgeAnnotations {
        let mut errors = EdgeAnnotations::new();
        let columns = data.columns();
        let n = full_graph.n_nodes();

        for target in 0..n {
            for source in 0..n {
                if source == target {
                    continue;
                }
                let (Some(source_name), Some(target_name)) =
                    (columns.get(source), columns.get(target))
                else {
                    continue;
                };

                let p = probability[(target, source)];
                let verdict = if full_graph.has_edge(source, target) {
                    (p < self.config.forbidden_below).then_some(Verdict::Forbidden)
                } else {
                    (p > self.config.forced_above).then_some(Verdict::Forced)
                };

                if let Some(verdict) = verdict {
                    debug!(
                        edge = %format!("{}->{}", source_name, target_name),
                        probability = p,
                        %verdict,
                        "bootstrap disagreement flagged"
                    );
                    // Names come straight from the dataset, so this cannot fail.
                    if let Ok(key) = EdgeKey::new(source_name.clone(), target_name.clone()) {
                        errors.insert(key, verdict);
                    }
                }
            }
        }

        errors
    }
}

/// Convenience wrapper used by the Judge: evaluate with explicit arguments.
pub fn bootstrap(
    data: &Dataset,
    full_graph: &CausalGraph,
    algorithm: &dyn CausalDiscoveryAlgorithm,
    hyperparameters: &Hyperparameters,
    config: BootstrapConfig,
) -> JudgeResult<BootstrapOutcome> {
    BootstrapEvaluator::new(config).run(data, full_graph, algorithm, hyperparameters)
}
