//! Feature classification and per-feature divergence tests.

mod classifier;
mod statistics;
mod tester;

pub use classifier::{classify, Classification, FeatureKind, CARDINALITY_THRESHOLD};
pub use statistics::{
    chi_square_independence, kolmogorov_sf, ks_two_sample, ChiSquareResult, ContingencyTable, KsResult,
    RunningMoments,
};
pub use tester::{test_feature, Side, TestOutcome, UntestableReason, MIN_CONTINUOUS_OBSERVATIONS};
