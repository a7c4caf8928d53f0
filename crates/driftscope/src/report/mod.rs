//! Verdicts, the dataset-level report, and the collaborators that consume it.
//!
//! [`aggregate`] turns per-feature verdicts into a [`DriftReport`]. Saving,
//! loading and chart data all work from that finished value.

mod aggregate;
pub mod chart;
mod persistence;
mod verdict;

pub use aggregate::{aggregate, aggregate_at, drift_percentage, DriftReport};
pub use persistence::{latest_report, REPORT_FILE_PREFIX};
pub use verdict::{ContinuousStats, ExcludedFeature, ExclusionReason, FeatureVerdict};
