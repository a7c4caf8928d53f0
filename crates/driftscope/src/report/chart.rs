//! Data behind the drift charts: per-feature histograms and a p-value heatmap.
//!
//! Rendering is left to the caller; these functions only compute what a
//! renderer would draw.

use serde::Serialize;

use super::aggregate::DriftReport;
use crate::dataset::Dataset;
use crate::drift::FeatureKind;

/// Bins per histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// p-values at or above this saturate the heatmap scale.
pub const HEATMAP_P_MAX: f64 = 0.1;

/// Reference and production densities over shared bin edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub feature: String,
    /// `HISTOGRAM_BINS + 1` ascending edges.
    pub edges: Vec<f64>,
    pub reference_density: Vec<f64>,
    pub production_density: Vec<f64>,
    pub drift_detected: bool,
    pub p_value: f64,
}

impl Histogram {
    /// Short status line for the chart title.
    pub fn title(&self) -> String {
        let status = if self.drift_detected { "DRIFT" } else { "OK" };
        format!("{} ({}, p={:.4})", self.feature, status, self.p_value)
    }
}

/// One heatmap cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub feature: String,
    pub p_value: f64,
    /// `p_value / HEATMAP_P_MAX`, clamped to `[0, 1]`.
    pub intensity: f64,
    pub drift_detected: bool,
}

/// Histograms for every continuous verdict in the report.
///
/// Features whose columns are missing or non-numeric on either side are skipped.
pub fn histograms(report: &DriftReport, reference: &Dataset, production: &Dataset) -> Vec<Histogram> {
    report
        .verdicts
        .values()
        .filter(|v| v.kind == FeatureKind::Continuous)
        .filter_map(|verdict| {
            let ref_values = reference.column(&verdict.name)?.present_numbers()?;
            let prod_values = production.column(&verdict.name)?.present_numbers()?;
            let edges = shared_edges(&ref_values, &prod_values)?;

            Some(Histogram {
                feature: verdict.name.clone(),
                reference_density: density(&ref_values, &edges),
                production_density: density(&prod_values, &edges),
                edges,
                drift_detected: verdict.drift_detected,
                p_value: verdict.p_value,
            })
        })
        .collect()
}

/// One cell per verdict, in report order.
pub fn p_value_heatmap(report: &DriftReport) -> Vec<HeatmapCell> {
    report
        .verdicts
        .values()
        .map(|v| HeatmapCell {
            feature: v.name.clone(),
            p_value: v.p_value,
            intensity: (v.p_value / HEATMAP_P_MAX).clamp(0.0, 1.0),
            drift_detected: v.drift_detected,
        })
        .collect()
}

fn shared_edges(a: &[f64], b: &[f64]) -> Option<Vec<f64>> {
    let (mut lo, mut hi) = a
        .iter()
        .chain(b)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / HISTOGRAM_BINS as f64;
    let mut edges: Vec<f64> = (0..HISTOGRAM_BINS).map(|i| lo + width * i as f64).collect();
    edges.push(hi);
    Some(edges)
}

/// Density-normalized counts: the bars integrate to 1 over the edges.
fn density(values: &[f64], edges: &[f64]) -> Vec<f64> {
    let bins = edges.len() - 1;
    let mut counts = vec![0usize; bins];
    let lo = edges[0];
    let width = (edges[bins] - lo) / bins as f64;

    for &x in values {
        // Last bin is closed on the right.
        let index = (((x - lo) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    let total = values.len() as f64;
    counts
        .into_iter()
        .map(|c| if total == 0.0 { 0.0 } else { c as f64 / (total * width) })
        .collect()
}
