use std::io::Write;
use std::sync::Mutex;

use tracing::warn;

use super::engine::AlertEvent;
use super::rules::AlertEventKind;
use crate::error::{DriftError, Result};

/// Destination for alert events.
pub trait AlertSink: Send + Sync {
    fn send(&self, event: &AlertEvent) -> Result<()>;
}

/// Emits each event as a structured `tracing` warning.
pub struct TracingSink;

impl AlertSink for TracingSink {
    fn send(&self, event: &AlertEvent) -> Result<()> {
        let d = &event.dimensions;
        let feature_kind = d.feature_kind.map(|k| k.to_string());
        let severity = d.severity.map(|s| s.to_string());
        match event.kind {
            AlertEventKind::DriftDetection => warn!(
                event_type = event.kind.as_str(),
                drift_percentage = d.drift_percentage,
                risk_level = d.risk_level.map(|r| r.as_str()),
                "{}",
                event.body
            ),
            AlertEventKind::FeatureDrift => warn!(
                event_type = event.kind.as_str(),
                feature_name = d.feature_name.as_deref(),
                p_value = d.p_value,
                statistic = d.statistic,
                kind = feature_kind.as_deref(),
                "{}",
                event.title
            ),
            AlertEventKind::ManualAlert => warn!(
                event_type = event.kind.as_str(),
                alert_message = event.body.as_str(),
                severity = severity.as_deref(),
                triggered_by = d.triggered_by.as_deref(),
                "{}",
                event.title
            ),
        }
        Ok(())
    }
}

/// Appends each event as one JSON object per line.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> AlertSink for JsonLinesSink<W> {
    fn send(&self, event: &AlertEvent) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| DriftError::Alert("alert writer lock poisoned".to_string()))?;

        serde_json::to_writer(&mut *writer, event)?;
        writer
            .write_all(b"\n")
            .and_then(|_| writer.flush())
            .map_err(|e| DriftError::Alert(format!("Failed to write alert: {}", e)))
    }
}

/// Collects events in memory.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<AlertEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn events(&self) -> Vec<AlertEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AlertSink for MemorySink {
    fn send(&self, event: &AlertEvent) -> Result<()> {
        self.events
            .lock()
            .map_err(|_| DriftError::Alert("alert buffer lock poisoned".to_string()))?
            .push(event.clone());
        Ok(())
    }
}

/// Send every event to every sink.
///
/// A failing sink does not stop delivery to the others; the first error is
/// returned once all sends have been attempted.
pub fn dispatch(events: &[AlertEvent], sinks: &[&dyn AlertSink]) -> Result<()> {
    let mut first_error = None;

    for event in events {
        for sink in sinks {
            if let Err(e) = sink.send(event) {
                warn!(error = %e, event_type = event.kind.as_str(), "alert delivery failed");
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
