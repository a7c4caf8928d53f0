//! Reference scenarios for the drift engine: identical data, a shifted
//! continuous feature, a redistributed categorical feature, a degenerate
//! sample, and a schema with nothing to compare.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use driftscope::drift::{test_feature, Side};
use driftscope::{
    default_excluded, run_drift_detection, Column, Dataset, DriftConfig, DriftEngine, ExclusionReason,
    FeatureKind, TestOutcome, UntestableReason,
};

const ROWS: usize = 1000;

fn uniform_ages(rng: &mut StdRng, rows: usize) -> Vec<Option<i64>> {
    (0..rows).map(|_| Some(rng.gen_range(18..=80))).collect()
}

fn balances(rng: &mut StdRng, rows: usize) -> Vec<Option<f64>> {
    (0..rows).map(|_| Some(rng.gen_range(0.0..250_000.0))).collect()
}

fn binary(rows: usize, share_of_a: f64) -> Vec<Option<String>> {
    let cutoff = (rows as f64 * share_of_a).round() as usize;
    (0..rows)
        .map(|i| Some(if i < cutoff { "A" } else { "B" }.to_string()))
        .collect()
}

#[test]
fn scenario_a_identical_distributions() {
    let mut rng = StdRng::seed_from_u64(42);
    let reference = Dataset::new()
        .with_integer("Age", uniform_ages(&mut rng, ROWS))
        .unwrap()
        .with_integer("Exited", vec![Some(0); ROWS])
        .unwrap();

    let report = run_drift_detection(&reference, &reference, 0.05, &default_excluded()).unwrap();
    let age = report.verdict("Age").unwrap();

    assert_eq!(age.kind, FeatureKind::Continuous);
    assert!(age.p_value > 0.05);
    assert!(!age.drift_detected);
    assert_eq!(report.features_drifted, 0);
}

#[test]
fn scenario_b_scaled_balance() {
    let mut rng = StdRng::seed_from_u64(7);
    let reference_balance = balances(&mut rng, ROWS);
    let production_balance: Vec<Option<f64>> = reference_balance.iter().map(|b| b.map(|v| v * 1.3)).collect();

    let reference = Dataset::new().with_float("Balance", reference_balance).unwrap();
    let production = Dataset::new().with_float("Balance", production_balance).unwrap();

    let report = run_drift_detection(&reference, &production, 0.05, &default_excluded()).unwrap();
    let balance = report.verdict("Balance").unwrap();

    assert_eq!(balance.kind, FeatureKind::Continuous);
    assert!(balance.p_value < 0.05);
    assert!(balance.drift_detected);
    assert!(balance.test_statistic > 0.15);
}

#[test]
fn scenario_c_categorical_redistribution() {
    let reference = Dataset::new().with_text("HasCrCard", binary(600, 0.5)).unwrap();
    let production = Dataset::new().with_text("HasCrCard", binary(600, 0.9)).unwrap();

    let report = run_drift_detection(&reference, &production, 0.05, &BTreeSet::new()).unwrap();
    let feature = report.verdict("HasCrCard").unwrap();

    assert_eq!(feature.kind, FeatureKind::Categorical);
    assert!(feature.p_value < 0.05);
    assert!(feature.drift_detected);
    assert!(feature.extra_stats.is_none());
}

#[test]
fn scenario_d_degenerate_continuous_sample() {
    // Direct call with the kind fixed to continuous and one reference value.
    let reference = Column::float("Balance", vec![Some(1200.0), None, None, None]);
    let production = Column::float("Balance", (0..50).map(|i| Some(i as f64)).collect());
    let outcome = test_feature("Balance", FeatureKind::Continuous, &reference, &production, 0.05).unwrap();
    assert_eq!(
        outcome,
        TestOutcome::Untestable(UntestableReason::InsufficientObservations {
            side: Side::Reference,
            count: 1
        })
    );

    // Through the engine, a continuous feature whose production side is nearly empty.
    let mut rng = StdRng::seed_from_u64(3);
    let reference = Dataset::new()
        .with_integer("Age", uniform_ages(&mut rng, ROWS))
        .unwrap()
        .with_float("Balance", balances(&mut rng, ROWS))
        .unwrap();
    let mut sparse: Vec<Option<f64>> = vec![None; ROWS];
    sparse[17] = Some(5000.0);
    let production = Dataset::new()
        .with_integer("Age", uniform_ages(&mut rng, ROWS))
        .unwrap()
        .with_float("Balance", sparse)
        .unwrap();

    let analysis = DriftEngine::new(DriftConfig::default())
        .analyze(&reference, &production)
        .unwrap();

    assert!(analysis.report.verdict("Balance").is_none());
    assert_eq!(analysis.report.features_analyzed, 1);
    assert_eq!(
        analysis.excluded[0].reason,
        ExclusionReason::Untestable(UntestableReason::InsufficientObservations {
            side: Side::Production,
            count: 1
        })
    );
}

#[test]
fn scenario_e_zero_comparable_features() {
    let reference = Dataset::new().with_integer("Exited", vec![Some(0), Some(1)]).unwrap();
    let production = Dataset::new()
        .with_integer("Exited", vec![Some(1), Some(1)])
        .unwrap()
        .with_integer("Age", vec![Some(30), Some(40)])
        .unwrap();

    let report = run_drift_detection(&reference, &production, 0.05, &default_excluded()).unwrap();

    assert_eq!(report.features_analyzed, 0);
    assert_eq!(report.features_drifted, 0);
    assert_eq!(report.drift_percentage, 0.0);
    assert!(report.verdicts.is_empty());
}
