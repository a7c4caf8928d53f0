//! Dataset-level risk classification and drift alert delivery.

mod engine;
mod rules;
mod sink;

pub use engine::{evaluate_alerts, AlertDimensions, AlertEvent};
pub use rules::{AlertEventKind, AlertSeverity, RiskLevel};
pub use sink::{dispatch, AlertSink, JsonLinesSink, MemorySink, TracingSink};
