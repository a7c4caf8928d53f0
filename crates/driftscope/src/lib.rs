//! Driftscope: per-feature data drift detection for tabular datasets.
//!
//! A reference dataset (what the model was trained on) is compared against a
//! production dataset, one feature at a time. Each feature is classified from
//! the reference side only, then tested:
//!
//! - **Continuous** features (numeric, more than 10 distinct reference values)
//!   with a two-sample Kolmogorov–Smirnov test.
//! - **Categorical** features with a chi-square test of independence on a
//!   2×K contingency table over the sorted union of categories.
//!
//! Verdicts are aggregated into a [`DriftReport`]. Features that cannot be
//! tested are dropped from the report and returned separately in
//! [`DriftAnalysis::excluded`].
//!
//! # Example
//!
//! ```no_run
//! use driftscope::{DriftConfig, DriftEngine};
//!
//! let engine = DriftEngine::new(DriftConfig::default());
//! let result = engine.analyze_files("bank_churn.csv", "production_data.csv").unwrap();
//!
//! for verdict in result.analysis.report.drifted_features() {
//!     println!("{}: p={:.4}", verdict.name, verdict.p_value);
//! }
//! ```

pub mod alert;
pub mod dataset;
pub mod drift;
pub mod error;
pub mod input;
pub mod report;
pub mod simulate;

mod engine;

pub use crate::engine::{
    default_excluded, run_drift_detection, DriftAnalysis, DriftConfig, DriftEngine, FileAnalysis,
    DEFAULT_TARGET, DEFAULT_THRESHOLD,
};
pub use dataset::{Column, ColumnType, Dataset};
pub use drift::{FeatureKind, TestOutcome, UntestableReason};
pub use error::{DriftError, Result};
pub use input::{DataTable, SourceMetadata};
pub use report::{DriftReport, ExcludedFeature, ExclusionReason, FeatureVerdict};
