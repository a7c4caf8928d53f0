//! Application state for the web server.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use driftscope::DriftConfig;

/// Settings fixed at startup.
#[derive(Debug)]
struct Settings {
    reference_path: PathBuf,
    production_path: PathBuf,
    output_dir: PathBuf,
    config: DriftConfig,
}

/// Shared, read-only application state.
///
/// Every request sees the same settings; nothing here changes after startup.
#[derive(Clone, Debug)]
pub struct AppState {
    settings: Arc<Settings>,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        reference_path: PathBuf,
        production_path: PathBuf,
        output_dir: PathBuf,
        config: DriftConfig,
    ) -> Self {
        Self {
            settings: Arc::new(Settings {
                reference_path,
                production_path,
                output_dir,
                config,
            }),
        }
    }

    pub fn reference_path(&self) -> &Path {
        &self.settings.reference_path
    }

    pub fn production_path(&self) -> &Path {
        &self.settings.production_path
    }

    /// Where saved reports go.
    pub fn output_dir(&self) -> &Path {
        &self.settings.output_dir
    }

    /// Base configuration; requests may override the threshold on a copy.
    pub fn config(&self) -> &DriftConfig {
        &self.settings.config
    }
}
