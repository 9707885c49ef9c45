// tests/golden_section_search.rs
// ===============================
// Convergence and argument-checking behaviour of the golden-section optimizer.

use chain_arbitrage::engine::optimizer::{
    maximize, maximize_with_report, shrink_factor, SearchReport, DEFAULT_MAX_ITERATIONS,
};
use chain_arbitrage::math::constant_product::{ChainProfitModel, Precision};
use chain_arbitrage::models::ChainConfig;
use chain_arbitrage::SearchError;

fn quadratic(x: f64) -> f64 {
    -(x - 5.0).powi(2) + 10.0
}

fn assert_geometric_shrink(report: &SearchReport, rel_tol: f64) {
    let factor = shrink_factor();
    for pair in report.history.windows(2) {
        let ratio = pair[1].width() / pair[0].width();
        assert!(
            (ratio - factor).abs() <= rel_tol * factor,
            "width ratio {ratio} deviates from {factor}"
        );
    }
}

#[test]
fn converges_to_analytic_optimum() {
    let x = maximize(quadratic, 0.0, 20.0, 1e-6).unwrap();
    assert!((x - 5.0).abs() < 1e-5, "x = {x}");
}

#[test]
fn bracket_shrinks_by_constant_factor() {
    let report = maximize_with_report(quadratic, 0.0, 20.0, 1e-6, DEFAULT_MAX_ITERATIONS).unwrap();
    assert!(report.iterations > 0);
    assert_geometric_shrink(&report, 1e-6);
}

#[test]
fn iteration_count_is_logarithmic() {
    let (lower, upper, tol) = (0.0, 20.0, 1e-6);
    let report = maximize_with_report(quadratic, lower, upper, tol, DEFAULT_MAX_ITERATIONS).unwrap();
    let expected = (((upper - lower) / tol).ln() / (1.0 / shrink_factor()).ln()).ceil() as usize;
    assert_eq!(report.iterations, expected);
    assert_eq!(report.evaluations, expected + 3);
    assert!(report.history.last().unwrap().width() <= tol);
}

#[test]
fn chain_objective_shrinks_geometrically() {
    let chain = ChainConfig::default_chain();
    let model = ChainProfitModel::new(&chain, Precision::Double);
    let report = maximize_with_report(model.objective(), 0.0, 1e11, 0.01, DEFAULT_MAX_ITERATIONS).unwrap();
    // widths near the end are a few ulps of a 4e7 argmax
    assert_geometric_shrink(&report, 1e-3);
    assert!(report.history.last().unwrap().width() <= 0.01);
}

#[test]
fn empty_bracket_is_rejected() {
    assert_eq!(
        maximize(quadratic, 5.0, 5.0, 0.01),
        Err(SearchError::InvalidInterval { lower: 5.0, upper: 5.0 })
    );
}

#[test]
fn inverted_bracket_is_rejected() {
    assert_eq!(
        maximize(quadratic, 5.0, 3.0, 0.01),
        Err(SearchError::InvalidInterval { lower: 5.0, upper: 3.0 })
    );
}

#[test]
fn non_positive_tolerance_is_rejected() {
    assert!(matches!(maximize(quadratic, 0.0, 20.0, 0.0), Err(SearchError::InvalidTolerance(_))));
    assert!(matches!(maximize(quadratic, 0.0, 20.0, f64::NAN), Err(SearchError::InvalidTolerance(_))));
}

#[test]
fn search_is_deterministic() {
    let a = maximize_with_report(quadratic, 0.0, 20.0, 1e-4, 100).unwrap();
    let b = maximize_with_report(quadratic, 0.0, 20.0, 1e-4, 100).unwrap();
    assert_eq!(a.argmax.to_bits(), b.argmax.to_bits());
    assert_eq!(a.history, b.history);
}

#[test]
fn non_unimodal_objective_still_terminates() {
    let wavy = |x: f64| (x / 3.0).sin() * x;
    let report = maximize_with_report(wavy, 0.0, 100.0, 1e-3, DEFAULT_MAX_ITERATIONS).unwrap();
    assert!((0.0..=100.0).contains(&report.argmax));
    assert!(report.history.last().unwrap().width() <= 1e-3);
}
