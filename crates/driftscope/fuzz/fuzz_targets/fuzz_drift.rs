//! Fuzz target for the drift engine.
//!
//! Builds a reference and production dataset from arbitrary values and
//! checks that a run never panics and every verdict stays in bounds.

#![no_main]

use arbitrary::Arbitrary;
use driftscope::{default_excluded, run_drift_detection, Dataset};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    reference: Vec<(Option<f64>, Option<u8>)>,
    production: Vec<(Option<f64>, Option<u8>)>,
    threshold: f64,
}

fn dataset(rows: &[(Option<f64>, Option<u8>)]) -> Option<Dataset> {
    Dataset::new()
        .with_float("Balance", rows.iter().map(|r| r.0).collect())
        .ok()?
        .with_text("Geography", rows.iter().map(|r| r.1.map(|c| format!("g{}", c % 8))).collect())
        .ok()
}

fuzz_target!(|input: Input| {
    let (Some(reference), Some(production)) = (dataset(&input.reference), dataset(&input.production)) else {
        return;
    };

    if let Ok(report) = run_drift_detection(&reference, &production, input.threshold, &default_excluded()) {
        for verdict in report.verdicts.values() {
            assert!((0.0..=1.0).contains(&verdict.p_value));
            assert!(verdict.test_statistic >= 0.0);
        }
    }
});
