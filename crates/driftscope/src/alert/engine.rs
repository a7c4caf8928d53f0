use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::rules::{AlertEventKind, AlertSeverity, RiskLevel};
use crate::drift::FeatureKind;
use crate::report::DriftReport;

/// Structured dimensions carried by an alert. Only the fields relevant to
/// the event kind are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertDimensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistic: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_kind: Option<FeatureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<AlertSeverity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggered_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub kind: AlertEventKind,
    pub title: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub dimensions: AlertDimensions,
}

impl AlertEvent {
    /// Operator-triggered alert.
    pub fn manual(message: impl Into<String>, severity: AlertSeverity) -> Self {
        let message = message.into();
        Self {
            kind: AlertEventKind::ManualAlert,
            title: format!("Manual drift alert ({})", severity),
            body: message,
            timestamp: Utc::now(),
            dimensions: AlertDimensions {
                severity: Some(severity),
                triggered_by: Some("api_endpoint".to_string()),
                ..Default::default()
            },
        }
    }
}

/// One dataset-level event, then one event per drifted feature.
pub fn evaluate_alerts(report: &DriftReport) -> Vec<AlertEvent> {
    let percentage = (report.drift_percentage * 100.0).round() / 100.0;
    let risk = RiskLevel::from_percentage(report.drift_percentage);

    let mut events = vec![AlertEvent {
        kind: AlertEventKind::DriftDetection,
        title: format!("Drift risk {}", risk),
        body: format!(
            "{} of {} features drifted ({:.2}%)",
            report.features_drifted, report.features_analyzed, percentage
        ),
        timestamp: report.generated_at,
        dimensions: AlertDimensions {
            drift_percentage: Some(percentage),
            risk_level: Some(risk),
            ..Default::default()
        },
    }];

    for verdict in report.drifted_features() {
        events.push(AlertEvent {
            kind: AlertEventKind::FeatureDrift,
            title: format!("Drift detected in {}", verdict.name),
            body: format!(
                "{} test: p={:.4}, statistic={:.4}",
                verdict.kind.test_name(),
                verdict.p_value,
                verdict.test_statistic
            ),
            timestamp: report.generated_at,
            dimensions: AlertDimensions {
                feature_name: Some(verdict.name.clone()),
                p_value: Some(verdict.p_value),
                statistic: Some(verdict.test_statistic),
                feature_kind: Some(verdict.kind),
                ..Default::default()
            },
        });
    }

    events
}
