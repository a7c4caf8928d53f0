//! Synthetic production data with a controlled amount of drift.
//!
//! Used to exercise the engine end to end: take a reference dataset, shift a
//! handful of known churn features, and write the result back out as the
//! "production" side.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dataset::{ColumnType, Dataset};
use crate::error::{DriftError, Result};

/// Share of rows forced to `IsActiveMember = 0`.
pub const INACTIVE_SHARE: f64 = 0.3;

/// Probability of `Geography_Germany = 1` after redistribution.
pub const GERMANY_SHARE: f64 = 0.6;

/// Valid credit score range.
pub const CREDIT_SCORE_RANGE: (f64, f64) = (300.0, 850.0);

/// How strongly [`simulate_drift`] perturbs the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftLevel {
    Low,
    #[default]
    Medium,
    High,
}

/// Per-level perturbations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftParams {
    pub age_shift: f64,
    pub credit_shift: f64,
    pub balance_multiplier: f64,
    pub salary_shift: f64,
    pub redistribute_geography: bool,
}

impl DriftLevel {
    pub fn params(&self) -> DriftParams {
        match self {
            DriftLevel::Low => DriftParams {
                age_shift: 2.0,
                credit_shift: -10.0,
                balance_multiplier: 1.05,
                salary_shift: 2000.0,
                redistribute_geography: false,
            },
            DriftLevel::Medium => DriftParams {
                age_shift: 5.0,
                credit_shift: -30.0,
                balance_multiplier: 1.15,
                salary_shift: 5000.0,
                redistribute_geography: true,
            },
            DriftLevel::High => DriftParams {
                age_shift: 10.0,
                credit_shift: -50.0,
                balance_multiplier: 1.30,
                salary_shift: 10000.0,
                redistribute_geography: true,
            },
        }
    }
}

impl fmt::Display for DriftLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriftLevel::Low => write!(f, "low"),
            DriftLevel::Medium => write!(f, "medium"),
            DriftLevel::High => write!(f, "high"),
        }
    }
}

impl FromStr for DriftLevel {
    type Err = DriftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(DriftLevel::Low),
            "medium" => Ok(DriftLevel::Medium),
            "high" => Ok(DriftLevel::High),
            other => Err(DriftError::Config(format!(
                "unknown drift level '{}', expected low, medium or high",
                other
            ))),
        }
    }
}

/// Derive a drifted copy of `reference`.
///
/// Columns the perturbations refer to but the dataset lacks are skipped, as
/// are text columns with those names. Missing cells stay missing. The same
/// seed always yields the same dataset.
pub fn simulate_drift(reference: &Dataset, level: DriftLevel, seed: u64) -> Result<Dataset> {
    if reference.is_empty() {
        return Err(DriftError::EmptyData("reference dataset has no columns".to_string()));
    }

    let params = level.params();
    let rows = reference.row_count();
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut data = reference.clone();

    info!(%level, rows, seed, "simulating drift");

    shift(&mut data, "Age", |v| v + params.age_shift);
    shift(&mut data, "CreditScore", |v| {
        (v + params.credit_shift).clamp(CREDIT_SCORE_RANGE.0, CREDIT_SCORE_RANGE.1)
    });
    if let Some(column) = data.column_mut("Balance") {
        column.map_numeric(ColumnType::Float, |_, v| v * params.balance_multiplier);
    }
    shift(&mut data, "EstimatedSalary", |v| v + params.salary_shift);

    let inactive: Vec<bool> = (0..rows).map(|_| rng.f64() < INACTIVE_SHARE).collect();
    if let Some(column) = data.column_mut("IsActiveMember") {
        let column_type = column.column_type();
        column.map_numeric(column_type, |row, v| if inactive[row] { 0.0 } else { v });
        debug!(inactive = inactive.iter().filter(|i| **i).count(), "deactivated members");
    }

    if params.redistribute_geography {
        let germany: Vec<f64> = (0..rows)
            .map(|_| if rng.f64() < GERMANY_SHARE { 1.0 } else { 0.0 })
            .collect();
        if let Some(column) = data.column_mut("Geography_Germany") {
            column.map_numeric(ColumnType::Integer, |row, _| germany[row]);
        }
        if let Some(column) = data.column_mut("Geography_Spain") {
            column.map_numeric(ColumnType::Integer, |row, _| 1.0 - germany[row]);
        }
    }

    Ok(data)
}

fn shift(data: &mut Dataset, name: &str, f: impl Fn(f64) -> f64) {
    if let Some(column) = data.column_mut(name) {
        let column_type = column.column_type();
        column.map_numeric(column_type, |_, v| f(v));
    }
}
