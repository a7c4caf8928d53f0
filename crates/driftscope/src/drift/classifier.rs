//! Assigns each comparable feature a kind from the reference data alone.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Dataset;

/// Numeric columns need strictly more distinct reference values than this
/// to be tested as continuous.
pub const CARDINALITY_THRESHOLD: usize = 10;

/// How a feature is tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Kolmogorov–Smirnov on the raw values.
    Continuous,
    /// Chi-square on category counts.
    Categorical,
}

impl FeatureKind {
    /// Name of the statistical test used for this kind.
    pub fn test_name(&self) -> &'static str {
        match self {
            FeatureKind::Continuous => "Kolmogorov-Smirnov",
            FeatureKind::Categorical => "Chi-Square",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKind::Continuous => write!(f, "continuous"),
            FeatureKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// Feature kinds in reference column order, plus the columns that could not
/// be paired across the two schemas.
///
/// Built once per run and handed to the tester unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub kinds: IndexMap<String, FeatureKind>,
    /// Reference columns with no production counterpart.
    pub missing_in_production: Vec<String>,
    /// Production columns with no reference counterpart.
    pub missing_in_reference: Vec<String>,
}

impl Classification {
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn kind(&self, feature: &str) -> Option<FeatureKind> {
        self.kinds.get(feature).copied()
    }
}

/// Classify every non-excluded reference column that production also has.
///
/// The kind depends only on the reference column; production values are
/// never inspected.
pub fn classify(reference: &Dataset, production: &Dataset, excluded: &BTreeSet<String>) -> Classification {
    let mut classification = Classification::default();

    for column in reference.columns() {
        let name = column.name();
        if excluded.contains(name) {
            continue;
        }
        if !production.contains(name) {
            classification.missing_in_production.push(name.to_string());
            continue;
        }

        let distinct = column.distinct_count();
        let kind = if column.column_type().is_numeric() && distinct > CARDINALITY_THRESHOLD {
            FeatureKind::Continuous
        } else {
            FeatureKind::Categorical
        };

        debug!(feature = name, %kind, distinct, "classified feature");
        classification.kinds.insert(name.to_string(), kind);
    }

    classification.missing_in_reference = production
        .column_names()
        .filter(|name| !excluded.contains(*name) && !reference.contains(name))
        .map(str::to_string)
        .collect();

    classification
}
