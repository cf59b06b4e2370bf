//! Section structs for [`super::JudgeSettings`].

use serde::{Deserialize, Serialize};

/// Bootstrap resampling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapSettings {
    /// Number of bootstrap iterations.
    pub boot_num: usize,

    /// Whether the data is a time series (selects block resampling).
    pub time_series: bool,

    /// Block length for the moving-block resampler.
    pub block_len: usize,

    /// An edge present in the full graph whose bootstrap probability falls
    /// strictly below this is flagged Forbidden.
    pub forbidden_below: f64,

    /// An edge absent from the full graph whose bootstrap probability rises
    /// strictly above this is flagged Forced.
    pub forced_above: f64,

    /// Base seed; each iteration derives its own seed from this.
    pub seed: u64,

    /// Wall-clock budget in seconds. When exceeded, no further iterations
    /// are launched and statistics come from completed runs.
    pub deadline_secs: Option<u64>,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            boot_num: 100,
            time_series: false,
            block_len: 10,
            forbidden_below: 0.1,
            forced_above: 0.9,
            seed: 42,
            deadline_secs: None,
        }
    }
}

/// Knowledge evaluator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeSettings {
    /// Whether to consult the knowledge evaluator at all.
    pub enabled: bool,

    /// Budget for the external evaluation call, in minutes. Passed through
    /// to the evaluator implementation; the judge itself does not cut the
    /// call off and instead recovers from a failed or abandoned evaluation.
    pub waiting_minutes: f64,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            waiting_minutes: 2.0,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Tracing filter directive, e.g. "info" or "causal_judge=debug".
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
