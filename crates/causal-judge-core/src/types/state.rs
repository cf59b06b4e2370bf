//! Shared analysis state threaded through the pipeline.
//!
//! The Judge is the only component allowed to write the four judge result
//! fields (`llm_errors`, `bootstrap_errors`, `bootstrap_probability`,
//! `revised_graph`); everything else treats [`GlobalState`] as read-only.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::metrics::GraphMetrics;
use crate::types::{BootstrapProbability, CausalGraph, Dataset, EdgeAnnotations};

/// User-provided inputs: the processed dataset, optional ground truth and
/// free-text domain knowledge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    /// Dataset after upstream preprocessing.
    pub processed_data: Dataset,

    /// Ground-truth graph, when the data is simulated.
    pub ground_truth: Option<CausalGraph>,

    /// Domain knowledge documents. An empty list, or a first document
    /// containing "no knowledge" (case-insensitive), disables the
    /// knowledge evaluator.
    pub knowledge_docs: Vec<String>,
}

/// Statistical characteristics of the dataset that steer resampling.
///
/// `boot_num` and `time_series` are advisory once a judge is built: the
/// bootstrap runs with the judge's own configuration, and `Judge::forward`
/// warns when the state disagrees with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of bootstrap iterations.
    pub boot_num: usize,

    /// Significance level used by the discovery algorithms.
    pub alpha: f64,

    /// Whether rows are time-ordered (selects block resampling).
    pub time_series: bool,

    /// Whether the data mixes sub-populations.
    pub heterogeneous: bool,

    /// Column identifying the sub-population of each row, when present.
    /// Discovery on heterogeneous data appends this as an extra graph node.
    pub domain_index: Option<String>,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            boot_num: 100,
            alpha: 0.1,
            time_series: false,
            heterogeneous: false,
            domain_index: None,
        }
    }
}

/// The selected discovery algorithm and its arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmChoice {
    /// Algorithm name (PC, FCI, CDNOD, GES, DirectLiNGAM, ICALiNGAM, NOTEARS).
    pub selected_algorithm: String,

    /// Hyperparameter name/value pairs forwarded verbatim to the runner.
    pub algorithm_arguments: Map<String, Value>,

    /// Wall-clock budget for a single algorithm run, enforced by the
    /// external orchestrator wrapping the runner.
    pub waiting_minutes: f64,
}

impl Default for AlgorithmChoice {
    fn default() -> Self {
        Self {
            selected_algorithm: String::new(),
            algorithm_arguments: Map::new(),
            waiting_minutes: 2.0,
        }
    }
}

/// Analysis results. The four judge outputs are owned by `Judge::forward`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Results {
    /// Graph discovered on the full dataset (judge input).
    pub converted_graph: Option<CausalGraph>,

    /// Graph after applying the combined error map (judge output).
    pub revised_graph: Option<CausalGraph>,

    /// Per-edge bootstrap stability (judge output).
    pub bootstrap_probability: Option<BootstrapProbability>,

    /// Knowledge-sourced error map (judge output).
    pub llm_errors: EdgeAnnotations,

    /// Statistics-sourced error map (judge output).
    pub bootstrap_errors: EdgeAnnotations,

    /// Metrics of the converted graph against ground truth.
    pub metrics: Option<GraphMetrics>,

    /// Metrics of the revised graph against ground truth.
    pub revised_metrics: Option<GraphMetrics>,
}

/// The full analysis state consumed and produced by the Judge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalState {
    pub user_data: UserData,
    pub statistics: Statistics,
    pub algorithm: AlgorithmChoice,
    pub results: Results,
}

impl GlobalState {
    /// Assemble a state around a dataset, with default statistics and an
    /// unselected algorithm.
    pub fn new(processed_data: Dataset) -> Self {
        Self {
            user_data: UserData {
                processed_data,
                ground_truth: None,
                knowledge_docs: Vec::new(),
            },
            statistics: Statistics::default(),
            algorithm: AlgorithmChoice::default(),
            results: Results::default(),
        }
    }
}
