//! Property-based tests for the drift engine.
//!
//! These tests use proptest to generate random samples and verify that the
//! engine's invariants hold for all of them:
//! 1. **Idempotence**: identical inputs give identical verdicts
//! 2. **Classification determinism**: kinds depend on the reference only
//! 3. **Threshold monotonicity**: a higher threshold never clears a drift flag
//! 4. **Bounds**: p-values in `[0, 1]`, statistics non-negative
//! 5. **Percentage consistency**: the summary matches the verdict counts
//!
//! ```bash
//! PROPTEST_CASES=10000 cargo test -p driftscope --test property_tests
//! ```

use std::collections::BTreeSet;

use indexmap::IndexMap;
use proptest::prelude::*;

use driftscope::drift::{chi_square_independence, classify, ks_two_sample, ContingencyTable};
use driftscope::report::aggregate;
use driftscope::{default_excluded, run_drift_detection, Dataset, FeatureKind, FeatureVerdict};

// =============================================================================
// Strategies
// =============================================================================

fn sample() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6f64..1.0e6, 2..150)
}

/// Integers in a narrow range, so ties and low cardinality both show up.
fn small_ints() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..25, 2..120)
}

fn categories() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(vec!["France", "Spain", "Germany", "Italy"]), 1..150)
        .prop_map(|v| v.into_iter().map(String::from).collect())
}

fn dataset(floats: &[f64], ints: &[i64], text: &[String]) -> Dataset {
    let rows = floats.len().min(ints.len()).min(text.len());
    Dataset::new()
        .with_float("Balance", floats[..rows].iter().map(|v| Some(*v)).collect())
        .unwrap()
        .with_integer("Tenure", ints[..rows].iter().map(|v| Some(*v)).collect())
        .unwrap()
        .with_text("Geography", text[..rows].iter().map(|v| Some(v.clone())).collect())
        .unwrap()
}

// =============================================================================
// Engine properties
// =============================================================================

proptest! {
    #[test]
    fn idempotent_runs(
        rf in sample(), ri in small_ints(), rt in categories(),
        pf in sample(), pi in small_ints(), pt in categories(),
    ) {
        let reference = dataset(&rf, &ri, &rt);
        let production = dataset(&pf, &pi, &pt);

        let first = run_drift_detection(&reference, &production, 0.05, &default_excluded()).unwrap();
        let second = run_drift_detection(&reference, &production, 0.05, &default_excluded()).unwrap();

        prop_assert_eq!(&first.verdicts, &second.verdicts);
        prop_assert_eq!(first.features_analyzed, second.features_analyzed);
        prop_assert_eq!(first.features_drifted, second.features_drifted);
        prop_assert_eq!(first.drift_percentage, second.drift_percentage);
    }

    #[test]
    fn classification_ignores_production(
        rf in sample(), ri in small_ints(), rt in categories(),
        pf in sample(), pi in small_ints(), pt in categories(),
    ) {
        let reference = dataset(&rf, &ri, &rt);
        let excluded = BTreeSet::new();

        let against_self = classify(&reference, &reference, &excluded);
        let against_other = classify(&reference, &dataset(&pf, &pi, &pt), &excluded);

        prop_assert_eq!(against_self.kinds, against_other.kinds);
    }

    #[test]
    fn verdicts_stay_in_bounds(
        rf in sample(), ri in small_ints(), rt in categories(),
        pf in sample(), pi in small_ints(), pt in categories(),
        threshold in 0.001f64..0.999,
    ) {
        let report = run_drift_detection(
            &dataset(&rf, &ri, &rt),
            &dataset(&pf, &pi, &pt),
            threshold,
            &BTreeSet::new(),
        )
        .unwrap();

        for verdict in report.verdicts.values() {
            prop_assert!((0.0..=1.0).contains(&verdict.p_value));
            prop_assert!(verdict.test_statistic >= 0.0);
            prop_assert_eq!(verdict.drift_detected, verdict.p_value < threshold);
        }
    }

    #[test]
    fn drift_is_monotonic_in_threshold(p in 0.0f64..=1.0, t1 in 0.001f64..0.999, t2 in 0.001f64..0.999) {
        let (low, high) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        let at_low = FeatureVerdict::new("x", FeatureKind::Continuous, p, 0.1, low, None);
        let at_high = FeatureVerdict::new("x", FeatureKind::Continuous, p, 0.1, high, None);
        prop_assert!(!at_low.drift_detected || at_high.drift_detected);
    }

    #[test]
    fn percentage_matches_counts(p_values in prop::collection::vec(0.0f64..=1.0, 0..40)) {
        let verdicts: IndexMap<String, FeatureVerdict> = p_values
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let name = format!("f{}", i);
                (name.clone(), FeatureVerdict::new(name, FeatureKind::Categorical, *p, 1.0, 0.05, None))
            })
            .collect();

        let report = aggregate(verdicts, 0.05);
        let drifted = p_values.iter().filter(|p| **p < 0.05).count();

        prop_assert_eq!(report.features_analyzed, p_values.len());
        prop_assert_eq!(report.features_drifted, drifted);
        if p_values.is_empty() {
            prop_assert_eq!(report.drift_percentage, 0.0);
        } else {
            prop_assert!((report.drift_percentage - 100.0 * drifted as f64 / p_values.len() as f64).abs() < 1e-9);
        }
    }
}

// =============================================================================
// Statistic properties
// =============================================================================

proptest! {
    #[test]
    fn ks_bounds_and_symmetry(a in sample(), b in sample()) {
        let forward = ks_two_sample(&a, &b);
        let backward = ks_two_sample(&b, &a);

        prop_assert!((0.0..=1.0).contains(&forward.statistic));
        prop_assert!((0.0..=1.0).contains(&forward.p_value));
        prop_assert!((forward.statistic - backward.statistic).abs() < 1e-12);
    }

    #[test]
    fn ks_self_comparison_is_zero(a in sample()) {
        let result = ks_two_sample(&a, &a);
        prop_assert_eq!(result.statistic, 0.0);
        prop_assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn chi_square_bounds(a in categories(), b in categories()) {
        use driftscope::dataset::Category;

        let table = ContingencyTable::from_samples(
            a.into_iter().map(Category::Text),
            b.into_iter().map(Category::Text),
        );
        prop_assume!(table.width() >= 2);

        let result = chi_square_independence(&table).unwrap();
        prop_assert!(result.statistic >= 0.0);
        prop_assert!((0.0..=1.0).contains(&result.p_value));
        prop_assert_eq!(result.degrees_of_freedom, table.width() - 1);
    }
}
