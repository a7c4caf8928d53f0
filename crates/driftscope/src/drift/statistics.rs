//! Two-sample tests and summary statistics.
//!
//! The Kolmogorov–Smirnov statistic is computed exactly from both sorted
//! samples; its p-value comes from the asymptotic Kolmogorov distribution.
//! The chi-square path builds a 2×K contingency table whose columns are the
//! sorted union of observed categories, and evaluates the upper tail of the
//! chi-square distribution through `statrs`.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::dataset::Category;
use crate::error::{DriftError, Result};

// =============================================================================
// RUNNING MOMENTS
// =============================================================================

/// Welford accumulator for mean and sample variance in one pass.
#[derive(Debug, Clone, Default)]
pub struct RunningMoments {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Bessel-corrected variance; zero below two observations.
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn sample_std(&self) -> f64 {
        self.sample_variance().sqrt()
    }
}

impl FromIterator<f64> for RunningMoments {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut moments = Self::new();
        for value in iter {
            moments.add(value);
        }
        moments
    }
}

// =============================================================================
// KOLMOGOROV–SMIRNOV
// =============================================================================

/// Outcome of a two-sample Kolmogorov–Smirnov test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KsResult {
    /// Supremum distance between the two empirical CDFs.
    pub statistic: f64,
    pub p_value: f64,
}

/// Two-sample Kolmogorov–Smirnov test. Both samples must be non-empty.
pub fn ks_two_sample(reference: &[f64], production: &[f64]) -> KsResult {
    let mut a = reference.to_vec();
    let mut b = production.to_vec();
    a.sort_by(f64::total_cmp);
    b.sort_by(f64::total_cmp);

    let n = a.len() as f64;
    let m = b.len() as f64;

    // Step both ECDFs past every copy of the next smallest value so ties
    // move together.
    let (mut i, mut j) = (0usize, 0usize);
    let mut statistic = 0.0f64;
    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        statistic = statistic.max((i as f64 / n - j as f64 / m).abs());
    }

    let effective_n = (n * m / (n + m)).sqrt();
    let p_value = kolmogorov_sf(statistic * effective_n);

    KsResult { statistic, p_value }
}

/// Survival function of the Kolmogorov distribution, `P(K > lambda)`.
pub fn kolmogorov_sf(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }

    let p = if lambda < 1.18 {
        // Theta-function form of the CDF; the alternating series is unstable here.
        let y = (-PI * PI / (8.0 * lambda * lambda)).exp();
        let cdf = (2.0 * PI).sqrt() / lambda * (y + y.powi(9) + y.powi(25) + y.powi(49));
        1.0 - cdf
    } else {
        let x = (-2.0 * lambda * lambda).exp();
        2.0 * (x - x.powi(4) + x.powi(9))
    };

    p.clamp(0.0, 1.0)
}

// =============================================================================
// CHI-SQUARE
// =============================================================================

/// 2×K table of reference and production counts over the sorted category union.
#[derive(Debug, Clone, PartialEq)]
pub struct ContingencyTable {
    categories: Vec<Category>,
    reference: Vec<u64>,
    production: Vec<u64>,
}

impl ContingencyTable {
    /// Count both samples over the union of their categories.
    pub fn from_samples(
        reference: impl IntoIterator<Item = Category>,
        production: impl IntoIterator<Item = Category>,
    ) -> Self {
        let mut counts: BTreeMap<Category, [u64; 2]> = BTreeMap::new();
        for category in reference {
            counts.entry(category).or_default()[0] += 1;
        }
        for category in production {
            counts.entry(category).or_default()[1] += 1;
        }

        let mut table = Self {
            categories: Vec::with_capacity(counts.len()),
            reference: Vec::with_capacity(counts.len()),
            production: Vec::with_capacity(counts.len()),
        };
        for (category, [r, p]) in counts {
            table.categories.push(category);
            table.reference.push(r);
            table.production.push(p);
        }
        table
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn reference_counts(&self) -> &[u64] {
        &self.reference
    }

    pub fn production_counts(&self) -> &[u64] {
        &self.production
    }

    /// Number of category columns (K).
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    pub fn reference_total(&self) -> u64 {
        self.reference.iter().sum()
    }

    pub fn production_total(&self) -> u64 {
        self.production.iter().sum()
    }

    /// Expected counts under independence, as `[reference, production]` per column.
    pub fn expected(&self) -> Vec<[f64; 2]> {
        let row_totals = [self.reference_total() as f64, self.production_total() as f64];
        let grand_total = row_totals[0] + row_totals[1];

        self.reference
            .iter()
            .zip(&self.production)
            .map(|(&r, &p)| {
                let column_total = (r + p) as f64;
                [
                    row_totals[0] * column_total / grand_total,
                    row_totals[1] * column_total / grand_total,
                ]
            })
            .collect()
    }

    /// First category whose expected frequency is zero, if any.
    pub fn zero_expected_category(&self) -> Option<&Category> {
        self.expected()
            .iter()
            .position(|e| e.iter().any(|&v| v <= 0.0 || !v.is_finite()))
            .map(|idx| &self.categories[idx])
    }
}

/// Outcome of Pearson's chi-square test of independence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquareResult {
    pub statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: usize,
}

/// Pearson's chi-square test on a 2×K table.
///
/// Applies the Yates continuity correction when the table has a single
/// degree of freedom. The table must have at least two categories and a
/// strictly positive expected frequency in every cell.
pub fn chi_square_independence(table: &ContingencyTable) -> Result<ChiSquareResult> {
    let degrees_of_freedom = table.width().saturating_sub(1);
    if degrees_of_freedom == 0 {
        return Err(DriftError::Statistics(
            "chi-square test needs at least two categories".to_string(),
        ));
    }

    let correction = degrees_of_freedom == 1;
    let observed = table.reference.iter().zip(&table.production);

    let mut statistic = 0.0;
    for ((&r, &p), expected) in observed.zip(table.expected()) {
        for (count, e) in [(r, expected[0]), (p, expected[1])] {
            let mut o = count as f64;
            if correction {
                let diff = e - o;
                o += diff.signum() * diff.abs().min(0.5);
            }
            statistic += (o - e).powi(2) / e;
        }
    }

    let distribution = ChiSquared::new(degrees_of_freedom as f64)
        .map_err(|e| DriftError::Statistics(format!("chi-square distribution: {e}")))?;
    let p_value = distribution.sf(statistic).clamp(0.0, 1.0);

    Ok(ChiSquareResult {
        statistic: statistic.max(0.0),
        p_value,
        degrees_of_freedom,
    })
}
