//! Domain types for causal graph judging.

mod dataset;
mod edge;
mod graph;
mod state;

pub use dataset::Dataset;
pub use edge::{EdgeAnnotations, EdgeKey, Verdict};
pub use graph::{BootstrapProbability, CausalGraph};
pub use state::{AlgorithmChoice, GlobalState, Results, Statistics, UserData};
