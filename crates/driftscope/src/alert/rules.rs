use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dataset-level risk band derived from the drift percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Percentage upper bound (exclusive) of the LOW band.
    pub const LOW_BELOW: f64 = 20.0;
    /// Percentage upper bound (inclusive) of the MEDIUM band.
    pub const MEDIUM_UP_TO: f64 = 50.0;

    /// `< 20` LOW, `20..=50` MEDIUM, `> 50` HIGH.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < Self::LOW_BELOW {
            RiskLevel::Low
        } else if percentage <= Self::MEDIUM_UP_TO {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertEventKind {
    DriftDetection,
    FeatureDrift,
    #[serde(rename = "manual_drift_alert")]
    ManualAlert,
}

impl AlertEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertEventKind::DriftDetection => "drift_detection",
            AlertEventKind::FeatureDrift => "feature_drift",
            AlertEventKind::ManualAlert => "manual_drift_alert",
        }
    }
}

/// Severity attached to operator-triggered alerts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    #[default]
    Warning,
    Critical,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "info"),
            AlertSeverity::Warning => write!(f, "warning"),
            AlertSeverity::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for AlertSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(AlertSeverity::Info),
            "warning" | "warn" => Ok(AlertSeverity::Warning),
            "critical" | "error" => Ok(AlertSeverity::Critical),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}
