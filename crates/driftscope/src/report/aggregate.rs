//! Dataset-level drift summary.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::verdict::FeatureVerdict;

/// The result of one engine run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub generated_at: DateTime<Utc>,
    pub threshold: f64,
    /// Keyed by feature name, in reference column order.
    pub verdicts: IndexMap<String, FeatureVerdict>,
    pub features_analyzed: usize,
    pub features_drifted: usize,
    pub drift_percentage: f64,
}

impl DriftReport {
    /// Verdicts with drift detected, in report order.
    pub fn drifted_features(&self) -> impl Iterator<Item = &FeatureVerdict> {
        self.verdicts.values().filter(|v| v.drift_detected)
    }

    pub fn verdict(&self, feature: &str) -> Option<&FeatureVerdict> {
        self.verdicts.get(feature)
    }

    /// True when no feature produced a verdict.
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }
}

/// `100 * drifted / analyzed`, or 0 when nothing was analyzed.
pub fn drift_percentage(drifted: usize, analyzed: usize) -> f64 {
    if analyzed == 0 {
        0.0
    } else {
        100.0 * drifted as f64 / analyzed as f64
    }
}

/// Summarize verdicts into a report stamped with the current UTC time.
pub fn aggregate(verdicts: IndexMap<String, FeatureVerdict>, threshold: f64) -> DriftReport {
    aggregate_at(verdicts, threshold, Utc::now())
}

/// [`aggregate`] with an explicit timestamp.
pub fn aggregate_at(
    verdicts: IndexMap<String, FeatureVerdict>,
    threshold: f64,
    generated_at: DateTime<Utc>,
) -> DriftReport {
    let features_analyzed = verdicts.len();
    let features_drifted = verdicts.values().filter(|v| v.drift_detected).count();

    DriftReport {
        generated_at,
        threshold,
        verdicts,
        features_analyzed,
        features_drifted,
        drift_percentage: drift_percentage(features_drifted, features_analyzed),
    }
}
