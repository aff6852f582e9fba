//! Explorer configuration, optionally read from a JSON file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default input file, looked up in the working directory.
pub const DEFAULT_CSV: &str = "trimmed_metadata.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Metadata CSV to load
    pub csv_path: PathBuf,

    /// Batch report settings
    pub report: ReportConfig,

    /// Interactive explorer settings
    pub explorer: ViewerConfig,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV),
            report: ReportConfig::default(),
            explorer: ViewerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Journals listed and charted
    pub top_journals: usize,

    /// Raw rows printed in the overview
    pub preview_rows: usize,

    /// Year entries printed from the start of the year series
    pub year_rows: usize,

    /// Directory the chart PNGs are written to
    pub output_dir: PathBuf,

    /// Open each chart with the system viewer once written
    pub open_charts: bool,

    /// Words kept for the title word cloud
    pub word_cloud_words: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_journals: 5,
            preview_rows: 5,
            year_rows: 5,
            output_dir: PathBuf::from("charts"),
            open_charts: true,
            word_cloud_words: crate::stats::DEFAULT_MAX_WORDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Journals in the bar chart
    pub top_journals: usize,

    /// Rows in the sample table
    pub preview_rows: usize,

    /// Initial year selection, clamped to the data
    pub default_year_range: (i32, i32),
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            top_journals: 10,
            preview_rows: 10,
            default_year_range: (2020, 2021),
        }
    }
}

impl ExplorerConfig {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ExplorerConfig::default();
        assert_eq!(config.csv_path, PathBuf::from("trimmed_metadata.csv"));
        assert_eq!(config.report.top_journals, 5);
        assert_eq!(config.explorer.top_journals, 10);
        assert_eq!(config.explorer.preview_rows, 10);
        assert_eq!(config.explorer.default_year_range, (2020, 2021));
        assert!(config.report.open_charts);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ExplorerConfig::from_json(
            r#"{ "csv_path": "data/meta.csv", "explorer": { "default_year_range": [2015, 2019] } }"#,
        )
        .unwrap();

        assert_eq!(config.csv_path, PathBuf::from("data/meta.csv"));
        assert_eq!(config.explorer.default_year_range, (2015, 2019));
        assert_eq!(config.explorer.top_journals, 10);
        assert_eq!(config.report, ReportConfig::default());
    }

    #[test]
    fn test_load_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = ExplorerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ExplorerConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
