//! Causal Judge Postprocessing
//!
//! Judges the quality of a discovered causal graph from two independent
//! perspectives and revises it accordingly:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           JUDGE                              │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Bootstrap Evaluator ─┐                                      │
//! │                       ├─→ Aggregate ─→ Revise ─→ state       │
//! │  Knowledge Evaluator ─┘   (knowledge wins)                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **Bootstrap module**: resamples the data, re-runs the discovery
//!   algorithm and estimates per-edge stability; sharp disagreement with
//!   the full-data graph becomes a statistics-sourced error map.
//! - **Aggregate module**: merges the statistics-sourced and the
//!   knowledge-sourced maps; domain knowledge wins on collision.
//! - **Revise module**: applies the combined map to a copy of the graph.
//! - **Judge**: sequences the above and owns the result fields on the
//!   shared analysis state.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use causal_judge_core::JudgeSettings;
//! use causal_judge_postprocess::Judge;
//!
//! let settings = JudgeSettings::load()?;
//! let judge = Judge::new(algorithm, knowledge_evaluator, &settings);
//! judge.forward(&mut state)?;
//! ```

pub mod aggregate;
pub mod bootstrap;
pub mod error;
pub mod judge;
pub mod revise;

// Re-exports
pub use aggregate::{aggregate, knowledge_available};
pub use bootstrap::{bootstrap, BootstrapConfig, BootstrapEvaluator, BootstrapOutcome};
pub use error::{JudgeError, JudgeResult};
pub use judge::{Judge, JudgeOutcome};
pub use revise::revise;
