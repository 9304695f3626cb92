//! Runtime settings.
//!
//! There is no settings file. The CLI fills these from its arguments and
//! everything else keeps its default.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default store file name, resolved against the working directory.
pub const DEFAULT_STORE_FILE: &str = "treadmill_log.csv";

/// Number of most recent sessions the report reads.
pub const HISTORY_WINDOW: usize = 20;

/// Number of most recent sessions the trend block compares.
pub const TREND_WINDOW: usize = 5;

/// Settings shared by the logging and reporting flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_FILE)
}
fn default_history_window() -> usize {
    HISTORY_WINDOW
}
fn default_trend_window() -> usize {
    TREND_WINDOW
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            history_window: HISTORY_WINDOW,
            trend_window: TREND_WINDOW,
        }
    }
}

impl Settings {
    /// Default settings with a different store path.
    pub fn with_store_path(path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: path.into(),
            ..Self::default()
        }
    }

    /// File name of the store, for user-facing messages.
    pub fn store_file_name(&self) -> String {
        self.store_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.store_path.display().to_string())
    }
}
