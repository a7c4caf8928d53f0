//! Per-feature divergence tests.
//!
//! Each call is independent: it sees one feature's reference and production
//! columns and the kind fixed by the classifier. Degenerate samples come
//! back as [`TestOutcome::Untestable`] so the run can continue; anything
//! else that goes wrong is a [`crate::DriftError`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::classifier::FeatureKind;
use super::statistics::{chi_square_independence, ks_two_sample, ContingencyTable, RunningMoments};
use crate::dataset::Column;
use crate::error::Result;
use crate::report::{ContinuousStats, FeatureVerdict};

/// Minimum non-missing observations per side for the KS test.
pub const MIN_CONTINUOUS_OBSERVATIONS: usize = 2;

/// Which dataset a sample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Reference,
    Production,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Reference => write!(f, "reference"),
            Side::Production => write!(f, "production"),
        }
    }
}

/// Why a feature produced no verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UntestableReason {
    #[error("{side} sample has {count} non-missing values, at least {MIN_CONTINUOUS_OBSERVATIONS} required")]
    InsufficientObservations { side: Side, count: usize },

    #[error("{side} values are not numeric")]
    NonNumericValues { side: Side },

    #[error("{side} sample has no non-missing values")]
    EmptySample { side: Side },

    #[error("only {count} distinct categories observed, at least 2 required")]
    TooFewCategories { count: usize },

    #[error("expected frequency of category '{category}' is zero")]
    ZeroExpectedFrequency { category: String },
}

/// Result of testing one feature.
#[derive(Debug, Clone, PartialEq)]
pub enum TestOutcome {
    Tested(FeatureVerdict),
    Untestable(UntestableReason),
}

impl TestOutcome {
    pub fn verdict(&self) -> Option<&FeatureVerdict> {
        match self {
            TestOutcome::Tested(verdict) => Some(verdict),
            TestOutcome::Untestable(_) => None,
        }
    }
}

/// Test one feature with the test its kind calls for.
pub fn test_feature(
    name: &str,
    kind: FeatureKind,
    reference: &Column,
    production: &Column,
    threshold: f64,
) -> Result<TestOutcome> {
    match kind {
        FeatureKind::Continuous => Ok(test_continuous(name, reference, production, threshold)),
        FeatureKind::Categorical => test_categorical(name, reference, production, threshold),
    }
}

fn numeric_sample(side: Side, column: &Column) -> std::result::Result<Vec<f64>, UntestableReason> {
    let values = column
        .present_numbers()
        .ok_or(UntestableReason::NonNumericValues { side })?;

    if values.len() < MIN_CONTINUOUS_OBSERVATIONS {
        return Err(UntestableReason::InsufficientObservations {
            side,
            count: values.len(),
        });
    }
    Ok(values)
}

fn test_continuous(name: &str, reference: &Column, production: &Column, threshold: f64) -> TestOutcome {
    let samples = numeric_sample(Side::Reference, reference)
        .and_then(|r| numeric_sample(Side::Production, production).map(|p| (r, p)));
    let (ref_values, prod_values) = match samples {
        Ok(pair) => pair,
        Err(reason) => return TestOutcome::Untestable(reason),
    };

    let ks = ks_two_sample(&ref_values, &prod_values);
    let ref_moments: RunningMoments = ref_values.iter().copied().collect();
    let prod_moments: RunningMoments = prod_values.iter().copied().collect();

    TestOutcome::Tested(FeatureVerdict::new(
        name,
        FeatureKind::Continuous,
        ks.p_value,
        ks.statistic,
        threshold,
        Some(ContinuousStats {
            ref_mean: ref_moments.mean(),
            prod_mean: prod_moments.mean(),
            ref_std: ref_moments.sample_std(),
            prod_std: prod_moments.sample_std(),
        }),
    ))
}

fn test_categorical(
    name: &str,
    reference: &Column,
    production: &Column,
    threshold: f64,
) -> Result<TestOutcome> {
    let table = ContingencyTable::from_samples(reference.categories(), production.categories());

    let degenerate = if table.reference_total() == 0 {
        Some(UntestableReason::EmptySample { side: Side::Reference })
    } else if table.production_total() == 0 {
        Some(UntestableReason::EmptySample { side: Side::Production })
    } else if table.width() < 2 {
        Some(UntestableReason::TooFewCategories { count: table.width() })
    } else {
        table
            .zero_expected_category()
            .map(|category| UntestableReason::ZeroExpectedFrequency {
                category: category.to_string(),
            })
    };

    if let Some(reason) = degenerate {
        return Ok(TestOutcome::Untestable(reason));
    }

    let chi = chi_square_independence(&table)?;

    Ok(TestOutcome::Tested(FeatureVerdict::new(
        name,
        FeatureKind::Categorical,
        chi.p_value,
        chi.statistic,
        threshold,
        None,
    )))
}
