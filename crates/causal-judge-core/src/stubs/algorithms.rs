//! Deterministic discovery-algorithm stubs.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{CoreError, CoreResult};
use crate::traits::{CausalDiscoveryAlgorithm, Hyperparameters};
use crate::types::{CausalGraph, Dataset};

/// Always returns the same graph; optionally fails on scheduled calls.
///
/// Call indices are assigned atomically in invocation order, so a failure
/// schedule remains exact even when calls run on a rayon pool.
pub struct FixedGraphAlgorithm {
    graph: CausalGraph,
    fail_on: HashSet<usize>,
    calls: AtomicUsize,
}

impl FixedGraphAlgorithm {
    /// A stub that reproduces `graph` on every call.
    pub fn new(graph: CausalGraph) -> Self {
        Self {
            graph,
            fail_on: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail (non-convergence) on the given zero-based call indices.
    pub fn with_failures(graph: CausalGraph, fail_on: HashSet<usize>) -> Self {
        Self {
            graph,
            fail_on,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `fit` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CausalDiscoveryAlgorithm for FixedGraphAlgorithm {
    fn name(&self) -> &str {
        "FixedGraph"
    }

    fn fit(&self, _data: &Dataset, _hyperparameters: &Hyperparameters) -> CoreResult<CausalGraph> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&call) {
            return Err(CoreError::AlgorithmNonConvergence {
                algorithm: self.name().to_string(),
                message: format!("scheduled failure on call {}", call),
            });
        }
        Ok(self.graph.clone())
    }
}

/// Cycles through a fixed sequence of graphs, one per call.
///
/// Lets tests pin exact bootstrap probabilities: with `boot_num` a multiple
/// of the sequence length, each graph contributes an equal share.
pub struct SequenceGraphAlgorithm {
    graphs: Vec<CausalGraph>,
    calls: AtomicUsize,
}

impl SequenceGraphAlgorithm {
    pub fn new(graphs: Vec<CausalGraph>) -> Self {
        assert!(!graphs.is_empty(), "sequence must contain at least one graph");
        Self {
            graphs,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `fit` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CausalDiscoveryAlgorithm for SequenceGraphAlgorithm {
    fn name(&self) -> &str {
        "SequenceGraph"
    }

    fn fit(&self, _data: &Dataset, _hyperparameters: &Hyperparameters) -> CoreResult<CausalGraph> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.graphs[call % self.graphs.len()].clone())
    }
}

/// Returns the base graph with seeded random off-diagonal flips.
///
/// Useful for bootstrap tests that need statistically plausible
/// disagreement rather than an exact schedule.
pub struct PerturbedGraphAlgorithm {
    base: CausalGraph,
    flip_probability: f64,
    seed: u64,
    calls: AtomicUsize,
}

impl PerturbedGraphAlgorithm {
    pub fn new(base: CausalGraph, flip_probability: f64, seed: u64) -> Self {
        Self {
            base,
            flip_probability,
            seed,
            calls: AtomicUsize::new(0),
        }
    }
}

impl CausalDiscoveryAlgorithm for PerturbedGraphAlgorithm {
    fn name(&self) -> &str {
        "PerturbedGraph"
    }

    fn fit(&self, _data: &Dataset, _hyperparameters: &Hyperparameters) -> CoreResult<CausalGraph> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) as u64;
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(call));
        let mut graph = self.base.clone();
        let n = graph.n_nodes();
        for target in 0..n {
            for source in 0..n {
                if source == target {
                    continue;
                }
                if rng.gen_bool(self.flip_probability) {
                    if graph.has_edge(source, target) {
                        graph.clear_edge(source, target);
                    } else {
                        graph.set_edge(source, target);
                    }
                }
            }
        }
        Ok(graph)
    }
}
