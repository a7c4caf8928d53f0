//! Per-feature verdict records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::drift::{FeatureKind, UntestableReason};

/// Diagnostic moments recorded for continuous features.
///
/// These never influence the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuousStats {
    pub ref_mean: f64,
    pub prod_mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub ref_std: f64,
    pub prod_std: f64,
}

/// Outcome of one feature's divergence test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVerdict {
    pub name: String,
    pub kind: FeatureKind,
    /// In `[0, 1]`.
    pub p_value: f64,
    /// KS `D` for continuous features, chi-square for categorical ones.
    pub test_statistic: f64,
    pub drift_detected: bool,
    /// `None` for categorical features.
    pub extra_stats: Option<ContinuousStats>,
}

impl FeatureVerdict {
    /// Build a verdict, deciding drift as `p_value < threshold`.
    pub fn new(
        name: impl Into<String>,
        kind: FeatureKind,
        p_value: f64,
        test_statistic: f64,
        threshold: f64,
        extra_stats: Option<ContinuousStats>,
    ) -> Self {
        let p_value = p_value.clamp(0.0, 1.0);
        Self {
            name: name.into(),
            kind,
            p_value,
            test_statistic: test_statistic.max(0.0),
            drift_detected: p_value < threshold,
            extra_stats,
        }
    }

    /// Relative change of the production mean against the reference mean, in percent.
    ///
    /// `None` for categorical features or a zero reference mean.
    pub fn mean_shift_percent(&self) -> Option<f64> {
        let stats = self.extra_stats?;
        if stats.ref_mean == 0.0 {
            return None;
        }
        Some((stats.prod_mean - stats.ref_mean) / stats.ref_mean.abs() * 100.0)
    }
}

/// Why a feature has no verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Reference column with no production counterpart.
    MissingInProduction,
    /// Production column with no reference counterpart.
    MissingInReference,
    Untestable(UntestableReason),
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::MissingInProduction => write!(f, "absent from production data"),
            ExclusionReason::MissingInReference => write!(f, "absent from reference data"),
            ExclusionReason::Untestable(reason) => write!(f, "untestable: {}", reason),
        }
    }
}

/// A feature left out of the report, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedFeature {
    pub name: String,
    pub reason: ExclusionReason,
}

impl ExcludedFeature {
    pub fn new(name: impl Into<String>, reason: ExclusionReason) -> Self {
        Self {
            name: name.into(),
            reason,
        }
    }

    /// True for degenerate samples, false for schema mismatches.
    pub fn is_untestable(&self) -> bool {
        matches!(self.reason, ExclusionReason::Untestable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::Side;

    #[test]
    fn test_drift_uses_strict_inequality() {
        let at = FeatureVerdict::new("Age", FeatureKind::Continuous, 0.05, 0.1, 0.05, None);
        let below = FeatureVerdict::new("Age", FeatureKind::Continuous, 0.0499, 0.1, 0.05, None);
        assert!(!at.drift_detected);
        assert!(below.drift_detected);
    }

    #[test]
    fn test_bounds_are_enforced() {
        let verdict = FeatureVerdict::new("x", FeatureKind::Categorical, 1.0 + 1e-12, -0.0, 0.05, None);
        assert_eq!(verdict.p_value, 1.0);
        assert!(verdict.test_statistic >= 0.0);
    }

    #[test]
    fn test_mean_shift_percent() {
        let stats = ContinuousStats {
            ref_mean: 200.0,
            prod_mean: 260.0,
            ref_std: 1.0,
            prod_std: 1.0,
        };
        let verdict = FeatureVerdict::new("Balance", FeatureKind::Continuous, 0.01, 0.3, 0.05, Some(stats));
        assert!((verdict.mean_shift_percent().unwrap() - 30.0).abs() < 1e-9);

        let categorical = FeatureVerdict::new("Geography", FeatureKind::Categorical, 0.01, 4.0, 0.05, None);
        assert_eq!(categorical.mean_shift_percent(), None);
    }

    #[test]
    fn test_verdict_json_shape() {
        let verdict = FeatureVerdict::new("Geography", FeatureKind::Categorical, 0.2, 1.5, 0.05, None);
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["kind"], "categorical");
        assert_eq!(json["drift_detected"], false);
        assert!(json["extra_stats"].is_null());
    }

    #[test]
    fn test_exclusion_display() {
        let excluded = ExcludedFeature::new(
            "Balance",
            ExclusionReason::Untestable(UntestableReason::EmptySample { side: Side::Reference }),
        );
        assert!(excluded.is_untestable());
        assert_eq!(
            excluded.reason.to_string(),
            "untestable: reference sample has no non-missing values"
        );
        assert!(!ExcludedFeature::new("Tenure", ExclusionReason::MissingInProduction).is_untestable());
    }
}
