//! Integration tests for ground-truth metrics over realistic graphs.

use causal_judge_core::metrics::evaluate;
use causal_judge_core::types::{CausalGraph, Dataset, EdgeKey};
use causal_judge_core::CoreError;
use nalgebra::DMatrix;

/// A five-variable chain X0 -> X1 -> X2 -> X3 -> X4.
fn chain_graph() -> CausalGraph {
    let mut graph = CausalGraph::zeros(5);
    for i in 0..4 {
        graph.set_edge(i, i + 1);
    }
    graph
}

#[test]
fn perfect_recovery_of_a_chain() {
    let truth = chain_graph();
    let metrics = evaluate(&chain_graph(), &truth).unwrap();
    assert_eq!(metrics.shd, 0);
    assert_eq!(metrics.precision, 1.0);
    assert_eq!(metrics.recall, 1.0);
    assert_eq!(metrics.f1, 1.0);
}

#[test]
fn missing_and_spurious_edges_accumulate_in_shd() {
    let truth = chain_graph();
    let mut est = chain_graph();
    est.clear_edge(0, 1); // one miss
    est.set_edge(0, 4); // one spurious edge

    let metrics = evaluate(&est, &truth).unwrap();
    assert_eq!(metrics.shd, 2);
    assert!((metrics.precision - 0.75).abs() < 1e-12);
    assert!((metrics.recall - 0.75).abs() < 1e-12);
}

#[test]
fn domain_index_heuristic_composes_with_edge_resolution() {
    // Dataset with an appended domain index column; edge keys resolve
    // against it while metrics drop its node.
    let data = Dataset::new(
        vec![
            "A".to_string(),
            "B".to_string(),
            "domain_index".to_string(),
        ],
        DMatrix::zeros(6, 3),
    )
    .unwrap();

    let key: EdgeKey = "A->B".parse().unwrap();
    let (target, source) = key.resolve(&data).unwrap();
    assert_eq!((target, source), (1, 0));

    let mut est = CausalGraph::zeros(3);
    est.set_edge(source, target);
    let truth = CausalGraph::from_row_slice(2, &[0, 0, 1, 0]).unwrap();

    let metrics = evaluate(&est, &truth).unwrap();
    assert_eq!(metrics.shd, 0);
    assert_eq!(metrics.f1, 1.0);
}

#[test]
fn shape_mismatch_larger_than_one_is_rejected() {
    let truth = CausalGraph::zeros(3);
    let est = chain_graph();
    assert!(matches!(
        evaluate(&est, &truth),
        Err(CoreError::ShapeMismatch {
            expected: 3,
            actual: 5
        })
    ));
}
