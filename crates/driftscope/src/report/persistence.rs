//! Saving and loading reports as JSON documents.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::{DriftError, Result};

use super::aggregate::DriftReport;

/// File name prefix used by [`DriftReport::save_in_dir`].
pub const REPORT_FILE_PREFIX: &str = "drift_report_";

impl DriftReport {
    /// Save the report to a JSON file, creating parent directories as needed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use driftscope::DriftReport;
    /// # fn example(report: &DriftReport) -> driftscope::Result<()> {
    /// report.save("reports/latest.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    DriftError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            DriftError::Persistence(format!("Failed to create file '{}': {}", path.display(), e))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| DriftError::Persistence(format!("Failed to serialize drift report: {}", e)))?;

        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            DriftError::Persistence(format!("Failed to open file '{}': {}", path.display(), e))
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            DriftError::Persistence(format!(
                "Failed to parse drift report '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// `drift_report_YYYYMMDD_HHMMSS.json`, from the report timestamp.
    pub fn file_name(&self) -> String {
        format!(
            "{}{}.json",
            REPORT_FILE_PREFIX,
            self.generated_at.format("%Y%m%d_%H%M%S")
        )
    }

    /// Save into `dir` under [`DriftReport::file_name`] and return the path written.
    pub fn save_in_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.file_name());
        self.save(&path)?;
        Ok(path)
    }
}

/// Newest timestamped report in `dir`, if any.
///
/// Timestamps in the file names sort lexicographically, so the greatest
/// name is the most recent report.
pub fn latest_report(dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(None);
    }

    let entries = fs::read_dir(dir).map_err(|e| DriftError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut latest: Option<PathBuf> = None;
    for entry in entries {
        let path = entry
            .map_err(|e| DriftError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?
            .path();

        let is_report = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(REPORT_FILE_PREFIX) && n.ends_with(".json"));
        if !is_report {
            continue;
        }

        if latest.as_ref().is_none_or(|current| path.file_name() > current.file_name()) {
            latest = Some(path);
        }
    }

    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::aggregate_at;
    use chrono::{TimeZone, Utc};
    use indexmap::IndexMap;

    fn report_at(hour: u32) -> DriftReport {
        let at = Utc.with_ymd_and_hms(2024, 5, 17, hour, 4, 5).unwrap();
        aggregate_at(IndexMap::new(), 0.05, at)
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/report.json");

        let report = report_at(9);
        report.save(&path).unwrap();

        assert_eq!(DriftReport::load(&path).unwrap(), report);
    }

    #[test]
    fn test_file_name_from_timestamp() {
        assert_eq!(report_at(9).file_name(), "drift_report_20240517_090405.json");
    }

    #[test]
    fn test_latest_report_picks_newest() {
        let dir = tempfile::tempdir().unwrap();
        report_at(9).save_in_dir(dir.path()).unwrap();
        let newest = report_at(23).save_in_dir(dir.path()).unwrap();
        report_at(11).save_in_dir(dir.path()).unwrap();
        fs::write(dir.path().join("notes.json"), "{}").unwrap();

        assert_eq!(latest_report(dir.path()).unwrap(), Some(newest));
    }

    #[test]
    fn test_latest_report_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(latest_report(dir.path().join("absent")).unwrap(), None);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();

        let err = DriftReport::load(&path).unwrap_err();
        assert!(matches!(err, DriftError::Persistence(_)));
    }
}
