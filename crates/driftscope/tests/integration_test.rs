//! End-to-end tests for the file-based drift pipeline.

use std::io::Write;
use tempfile::NamedTempFile;

use driftscope::alert::{dispatch, evaluate_alerts, MemorySink, RiskLevel};
use driftscope::report::{chart, latest_report};
use driftscope::simulate::{simulate_drift, DriftLevel};
use driftscope::{DriftConfig, DriftEngine, DriftReport, ExclusionReason, FeatureKind};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// Churn-shaped CSV. `balance_factor` scales Balance; `skew_geography`
/// moves most rows to Germany.
fn churn_csv(rows: usize, balance_factor: f64, skew_geography: bool) -> String {
    let mut data = String::from("RowNumber,Age,Balance,Geography,IsActiveMember,Exited\n");
    for i in 0..rows {
        let geography = if skew_geography && i % 10 != 0 {
            "Germany"
        } else {
            ["France", "Spain", "Germany"][i % 3]
        };
        data.push_str(&format!(
            "{},{},{:.2},{},{},{}\n",
            i + 1,
            20 + (i * 7) % 50,
            ((i * 37) % 1000) as f64 * 100.0 * balance_factor,
            geography,
            i % 2,
            u8::from(i % 5 == 0),
        ));
    }
    data
}

// =============================================================================
// Pipeline
// =============================================================================

#[test]
fn test_identical_files_show_no_drift() {
    let reference = create_test_file(&churn_csv(500, 1.0, false));
    let production = create_test_file(&churn_csv(500, 1.0, false));

    let engine = DriftEngine::new(DriftConfig::default().exclude("RowNumber"));
    let result = engine
        .analyze_files(reference.path(), production.path())
        .expect("Analysis failed");

    let report = &result.analysis.report;
    assert_eq!(report.features_analyzed, 4);
    assert_eq!(report.features_drifted, 0);
    assert_eq!(report.drift_percentage, 0.0);
    assert!(report.verdicts.values().all(|v| v.p_value > 0.99));

    assert_eq!(result.reference_source.format, "csv");
    assert_eq!(result.reference_source.row_count, 500);
    assert_eq!(result.reference_source.hash, result.production_source.hash);
}

#[test]
fn test_shifted_files_detect_drift() {
    let reference = create_test_file(&churn_csv(500, 1.0, false));
    let production = create_test_file(&churn_csv(500, 1.3, true));

    let engine = DriftEngine::new(DriftConfig::default().exclude("RowNumber"));
    let result = engine
        .analyze_files(reference.path(), production.path())
        .expect("Analysis failed");
    let report = &result.analysis.report;

    assert_eq!(
        report.verdicts.keys().collect::<Vec<_>>(),
        vec!["Age", "Balance", "Geography", "IsActiveMember"]
    );

    let balance = report.verdict("Balance").unwrap();
    assert_eq!(balance.kind, FeatureKind::Continuous);
    assert!(balance.drift_detected);
    let stats = balance.extra_stats.unwrap();
    assert!((stats.prod_mean / stats.ref_mean - 1.3).abs() < 1e-6);

    let geography = report.verdict("Geography").unwrap();
    assert_eq!(geography.kind, FeatureKind::Categorical);
    assert!(geography.drift_detected);

    assert!(!report.verdict("Age").unwrap().drift_detected);
    assert_eq!(report.features_drifted, 2);
    assert_eq!(report.drift_percentage, 50.0);

    let events = evaluate_alerts(report);
    assert_eq!(events[0].dimensions.risk_level, Some(RiskLevel::Medium));
    assert_eq!(events.len(), 3);
}

#[test]
fn test_target_is_never_compared() {
    let reference = create_test_file("Age,Exited\n1,0\n2,0\n3,0\n");
    let production = create_test_file("Age,Exited\n1,1\n2,1\n3,1\n");

    let result = DriftEngine::default()
        .analyze_files(reference.path(), production.path())
        .unwrap();
    assert!(result.analysis.report.verdict("Exited").is_none());
    assert!(result.analysis.classification.kind("Exited").is_none());
}

#[test]
fn test_semicolon_files_with_missing_columns() {
    let reference = create_test_file("Age;Tenure;Exited\n30;1;0\n40;2;1\n50;1;0\n");
    let production = create_test_file("Age;Exited;Channel\n35;0;web\n45;1;app\n55;0;web\n");

    let result = DriftEngine::default()
        .analyze_files(reference.path(), production.path())
        .unwrap();

    let excluded: Vec<_> = result
        .analysis
        .excluded
        .iter()
        .map(|e| (e.name.as_str(), e.reason.clone()))
        .collect();
    assert_eq!(
        excluded,
        vec![
            ("Tenure", ExclusionReason::MissingInProduction),
            ("Channel", ExclusionReason::MissingInReference),
        ]
    );
    assert_eq!(result.reference_source.format, "csv-semicolon");
}

// =============================================================================
// Collaborators
// =============================================================================

#[test]
fn test_report_persistence_round_trip() {
    let reference = create_test_file(&churn_csv(200, 1.0, false));
    let production = create_test_file(&churn_csv(200, 1.3, false));
    let dir = tempfile::tempdir().unwrap();

    let result = DriftEngine::default()
        .analyze_files(reference.path(), production.path())
        .unwrap();
    let saved = result.analysis.report.save_in_dir(dir.path()).unwrap();

    assert_eq!(latest_report(dir.path()).unwrap(), Some(saved.clone()));
    let loaded = DriftReport::load(&saved).unwrap();
    let original = &result.analysis.report;
    assert_eq!(loaded.generated_at, original.generated_at);
    assert_eq!(loaded.features_analyzed, original.features_analyzed);
    assert_eq!(loaded.features_drifted, original.features_drifted);
    assert_eq!(loaded.verdicts.keys().collect::<Vec<_>>(), original.verdicts.keys().collect::<Vec<_>>());
    for (name, verdict) in &loaded.verdicts {
        let before = &original.verdicts[name];
        assert_eq!(verdict.drift_detected, before.drift_detected);
        assert!((verdict.p_value - before.p_value).abs() <= f64::EPSILON * before.p_value.max(1e-300));
    }

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&saved).unwrap()).unwrap();
    assert!(json["verdicts"]["Balance"]["extra_stats"]["ref_std"].is_number());
    assert!(json["verdicts"]["Geography"]["extra_stats"].is_null());
}

#[test]
fn test_simulated_production_drifts() {
    let reference_file = create_test_file(&churn_csv(1000, 1.0, false));
    let dir = tempfile::tempdir().unwrap();
    let production_path = dir.path().join("production_data.csv");

    let engine = DriftEngine::new(DriftConfig::default().exclude("RowNumber"));
    let (table, _) = driftscope::input::Parser::new()
        .parse_file(reference_file.path())
        .unwrap();
    let reference = driftscope::Dataset::from_table(&table).unwrap();
    simulate_drift(&reference, DriftLevel::High, 42)
        .unwrap()
        .write_csv(&production_path)
        .unwrap();

    let result = engine
        .analyze_files(reference_file.path(), &production_path)
        .unwrap();
    let report = &result.analysis.report;

    assert!(report.verdict("Age").unwrap().drift_detected);
    assert!(report.verdict("Balance").unwrap().drift_detected);
    assert!(report.verdict("IsActiveMember").unwrap().drift_detected);
    assert!(!report.verdict("Geography").unwrap().drift_detected);

    let sink = MemorySink::new();
    dispatch(&evaluate_alerts(report), &[&sink]).unwrap();
    assert_eq!(sink.events().len(), 1 + report.features_drifted);

    let charts = chart::histograms(report, &result.reference, &result.production);
    assert_eq!(charts.len(), 2);
    assert!(charts.iter().all(|h| h.edges.len() == chart::HISTOGRAM_BINS + 1));
}
