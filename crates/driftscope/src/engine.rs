//! The drift detection pipeline: classify, test, aggregate.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::dataset::Dataset;
use crate::drift::{classify, test_feature, Classification, FeatureKind, TestOutcome};
use crate::error::{DriftError, Result};
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::report::{aggregate, DriftReport, ExcludedFeature, ExclusionReason, FeatureVerdict};

/// Default significance threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.05;

/// Default prediction target, always left out of comparison.
pub const DEFAULT_TARGET: &str = "Exited";

/// Configuration for a drift run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Drift is flagged when a feature's p-value falls below this.
    pub threshold: f64,
    /// Prediction target column; never tested.
    pub target_column: Option<String>,
    /// Further columns to leave out.
    pub excluded_columns: BTreeSet<String>,
    /// Run per-feature tests on the rayon thread pool.
    pub parallel: bool,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            target_column: Some(DEFAULT_TARGET.to_string()),
            excluded_columns: BTreeSet::new(),
            parallel: false,
        }
    }
}

impl DriftConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target_column = Some(target.into());
        self
    }

    /// Compare every column, the default target included.
    pub fn without_target(mut self) -> Self {
        self.target_column = None;
        self
    }

    pub fn exclude(mut self, column: impl Into<String>) -> Self {
        self.excluded_columns.insert(column.into());
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reject thresholds outside the open interval (0, 1), NaN included.
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(DriftError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }

    /// Excluded columns plus the target.
    pub fn effective_excluded(&self) -> BTreeSet<String> {
        let mut excluded = self.excluded_columns.clone();
        excluded.extend(self.target_column.iter().cloned());
        excluded
    }

    /// Load and validate a JSON configuration file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| DriftError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = serde_json::from_str(&text).map_err(|e| {
            DriftError::Config(format!("Failed to parse '{}': {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// A finished run: the report plus what was classified and what was left out.
///
/// Exclusions are kept beside the report rather than inside it so the
/// serialized report keeps its fixed shape.
#[derive(Debug, Clone)]
pub struct DriftAnalysis {
    pub report: DriftReport,
    pub classification: Classification,
    /// In the order they were found: schema mismatches first, then untestable features.
    pub excluded: Vec<ExcludedFeature>,
}

impl DriftAnalysis {
    /// Features dropped for a degenerate sample.
    pub fn untestable(&self) -> impl Iterator<Item = &ExcludedFeature> {
        self.excluded.iter().filter(|e| e.is_untestable())
    }
}

/// [`DriftAnalysis`] of two files, with their provenance and parsed data.
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub reference_source: SourceMetadata,
    pub production_source: SourceMetadata,
    pub reference: Dataset,
    pub production: Dataset,
    pub analysis: DriftAnalysis,
}

/// Runs drift detection with a fixed configuration.
///
/// # Example
///
/// ```no_run
/// use driftscope::{DriftConfig, DriftEngine};
///
/// let engine = DriftEngine::new(DriftConfig::default().with_threshold(0.01));
/// let result = engine.analyze_files("reference.csv", "production.csv").unwrap();
///
/// println!("Drifted: {}%", result.analysis.report.drift_percentage);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DriftEngine {
    config: DriftConfig,
    parser: Parser,
}

impl DriftEngine {
    pub fn new(config: DriftConfig) -> Self {
        Self {
            config,
            parser: Parser::new(),
        }
    }

    /// Use a custom parser configuration for [`DriftEngine::analyze_files`].
    pub fn with_parser(mut self, config: ParserConfig) -> Self {
        self.parser = Parser::with_config(config);
        self
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Compare two loaded datasets.
    pub fn analyze(&self, reference: &Dataset, production: &Dataset) -> Result<DriftAnalysis> {
        self.config.validate()?;
        if reference.is_empty() {
            return Err(DriftError::EmptyData("reference dataset has no columns".to_string()));
        }
        if production.is_empty() {
            return Err(DriftError::EmptyData("production dataset has no columns".to_string()));
        }

        let threshold = self.config.threshold;
        let classification = classify(reference, production, &self.config.effective_excluded());

        let features: Vec<(&String, FeatureKind)> =
            classification.kinds.iter().map(|(name, kind)| (name, *kind)).collect();
        let run = |&(name, kind): &(&String, FeatureKind)| -> Result<(String, TestOutcome)> {
            let (ref_col, prod_col) = reference
                .column(name)
                .zip(production.column(name))
                .ok_or_else(|| DriftError::Config(format!("feature '{}' not present in both datasets", name)))?;
            Ok((name.clone(), test_feature(name, kind, ref_col, prod_col, threshold)?))
        };

        let outcomes: Vec<(String, TestOutcome)> = if self.config.parallel {
            features.par_iter().map(run).collect::<Result<_>>()?
        } else {
            features.iter().map(run).collect::<Result<_>>()?
        };

        let mut excluded: Vec<ExcludedFeature> = classification
            .missing_in_production
            .iter()
            .map(|name| ExcludedFeature::new(name.as_str(), ExclusionReason::MissingInProduction))
            .chain(
                classification
                    .missing_in_reference
                    .iter()
                    .map(|name| ExcludedFeature::new(name.as_str(), ExclusionReason::MissingInReference)),
            )
            .collect();

        let mut verdicts: IndexMap<String, FeatureVerdict> = IndexMap::with_capacity(outcomes.len());
        for (name, outcome) in outcomes {
            match outcome {
                TestOutcome::Tested(verdict) => {
                    verdicts.insert(name, verdict);
                }
                TestOutcome::Untestable(reason) => {
                    excluded.push(ExcludedFeature::new(name, ExclusionReason::Untestable(reason)));
                }
            }
        }

        for feature in &excluded {
            warn!(feature = feature.name.as_str(), reason = %feature.reason, "feature excluded from drift report");
        }

        let report = aggregate(verdicts, threshold);
        info!(
            features_analyzed = report.features_analyzed,
            features_drifted = report.features_drifted,
            drift_percentage = report.drift_percentage,
            excluded = excluded.len(),
            "drift detection complete"
        );

        Ok(DriftAnalysis {
            report,
            classification,
            excluded,
        })
    }

    /// Load two delimited files and compare them.
    pub fn analyze_files(
        &self,
        reference: impl AsRef<Path>,
        production: impl AsRef<Path>,
    ) -> Result<FileAnalysis> {
        let (ref_table, reference_source) = self.parser.parse_file(reference)?;
        let (prod_table, production_source) = self.parser.parse_file(production)?;

        let reference = Dataset::from_table(&ref_table)?;
        let production = Dataset::from_table(&prod_table)?;
        let analysis = self.analyze(&reference, &production)?;

        Ok(FileAnalysis {
            reference_source,
            production_source,
            reference,
            production,
            analysis,
        })
    }
}

/// The default excluded set: just the prediction target.
pub fn default_excluded() -> BTreeSet<String> {
    BTreeSet::from([DEFAULT_TARGET.to_string()])
}

/// Compare `production` against `reference`, leaving out exactly `excluded_columns`.
///
/// Fails only for an invalid threshold or a dataset with no columns at all.
/// Per-feature problems drop that feature and are logged.
pub fn run_drift_detection(
    reference: &Dataset,
    production: &Dataset,
    threshold: f64,
    excluded_columns: &BTreeSet<String>,
) -> Result<DriftReport> {
    let config = DriftConfig {
        threshold,
        target_column: None,
        excluded_columns: excluded_columns.clone(),
        parallel: false,
    };
    DriftEngine::new(config)
        .analyze(reference, production)
        .map(|analysis| analysis.report)
}
