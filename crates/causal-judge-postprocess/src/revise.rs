//! Graph revision from an aggregated error map.
//!
//! Copy-on-write contract: the input graph is cloned and the clone is
//! mutated, so callers keep their original full-data graph untouched.

use tracing::{debug, warn};

use causal_judge_core::types::{CausalGraph, Dataset, EdgeAnnotations, Verdict};
use causal_judge_core::CoreError;

use crate::error::JudgeResult;

/// Apply the combined error map to a graph.
///
/// Each edge key is resolved to `(target_row, source_col)` via the
/// dataset's column order; a name absent from the columns is a fatal
/// [`CoreError::UnknownColumn`]. `Forced` sets the cell to 1, `Forbidden`
/// clears it to 0. Self-loop keys are skipped with a warning so the zero
/// diagonal survives revision. Unrecognized verdicts never reach this
/// function: they are dropped when the raw map is parsed into
/// [`EdgeAnnotations`].
pub fn revise(
    graph: &CausalGraph,
    errors: &EdgeAnnotations,
    data: &Dataset,
) -> JudgeResult<CausalGraph> {
    let mut revised = graph.clone();

    for (key, verdict) in errors.iter() {
        let (target, source) = key.resolve(data)?;
        if target == source {
            warn!(edge = %key, %verdict, "ignoring self-loop verdict");
            continue;
        }
        if target >= revised.n_nodes() || source >= revised.n_nodes() {
            return Err(CoreError::ShapeMismatch {
                expected: revised.n_nodes(),
                actual: target.max(source) + 1,
            }
            .into());
        }

        debug!(edge = %key, %verdict, "revising edge");
        match verdict {
            Verdict::Forced => revised.set_edge(source, target),
            Verdict::Forbidden => revised.clear_edge(source, target),
        }
    }

    Ok(revised)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JudgeError;
    use causal_judge_core::types::EdgeKey;
    use nalgebra::DMatrix;

    fn xyz_dataset() -> Dataset {
        Dataset::new(
            vec!["X".to_string(), "Y".to_string(), "Z".to_string()],
            DMatrix::zeros(4, 3),
        )
        .unwrap()
    }

    #[test]
    fn test_forced_edge_set() {
        let data = xyz_dataset();
        let graph = CausalGraph::zeros(3);
        let errors = EdgeAnnotations::from_raw([("X->Y", "Forced")]);

        let revised = revise(&graph, &errors, &data).unwrap();
        assert_eq!(revised.matrix()[(1, 0)], 1);
        assert_eq!(revised.edge_count(), 1);
    }

    #[test]
    fn test_forbidden_edge_cleared() {
        let data = xyz_dataset();
        let mut graph = CausalGraph::zeros(3);
        graph.set_edge(2, 0); // Z -> X
        let errors = EdgeAnnotations::from_raw([("Z->X", "Forbidden")]);

        let revised = revise(&graph, &errors, &data).unwrap();
        assert_eq!(revised.edge_count(), 0);
    }

    #[test]
    fn test_unrecognized_verdict_is_a_no_op() {
        let data = xyz_dataset();
        let graph = CausalGraph::zeros(3);
        // "Suggested" is dropped during parsing; the matrix is unchanged.
        let errors = EdgeAnnotations::from_raw([("X->Y", "Suggested")]);

        let revised = revise(&graph, &errors, &data).unwrap();
        assert_eq!(revised, graph);
    }

    #[test]
    fn test_unknown_column_is_fatal() {
        let data = xyz_dataset();
        let graph = CausalGraph::zeros(3);
        let errors = EdgeAnnotations::from_raw([("X->W", "Forced")]);

        match revise(&graph, &errors, &data) {
            Err(JudgeError::Core(CoreError::UnknownColumn { name })) => {
                assert_eq!(name, "W");
            }
            other => panic!("expected UnknownColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_input_graph_not_mutated() {
        let data = xyz_dataset();
        let graph = CausalGraph::zeros(3);
        let errors = EdgeAnnotations::from_raw([("X->Y", "Forced")]);

        let revised = revise(&graph, &errors, &data).unwrap();
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(revised.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_verdict_keeps_diagonal_zero() {
        let graph = CausalGraph::zeros(2);
        let data = Dataset::new(
            vec!["X".to_string(), "Y".to_string()],
            DMatrix::zeros(4, 2),
        )
        .unwrap();
        let errors = EdgeAnnotations::from_raw([("X->X", "Forced")]);

        let revised = revise(&graph, &errors, &data).unwrap();
        assert_eq!(revised.matrix()[(0, 0)], 0);
        assert_eq!(revised, graph);
    }

    #[test]
    fn test_forced_then_forbidden_on_same_cell() {
        let data = xyz_dataset();
        let mut graph = CausalGraph::zeros(3);
        graph.set_edge(0, 1);
        let mut errors = EdgeAnnotations::new();
        errors.insert("X->Y".parse::<EdgeKey>().unwrap(), Verdict::Forbidden);

        let revised = revise(&graph, &errors, &data).unwrap();
        assert!(!revised.has_edge(0, 1));
    }
}
