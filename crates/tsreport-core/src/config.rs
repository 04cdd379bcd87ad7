//! Report configuration
//!
//! Every field has a default, so an empty TOML file (or no file at all)
//! reproduces the standard report:
//!
//! ```toml
//! output = "TimeSheet Report.xlsx"
//! leave_marker = "On Leave"
//!
//! [columns]
//! name = "Emp Name"
//! date = "Date"
//! title = "Title"
//! description = "Description"
//! hours = "Total Hours"
//!
//! [style]
//! font = "Calibri"
//! description_width = 120.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "TimeSheet Report.xlsx";

/// Marker stamped on weekdays without any recorded work
pub const DEFAULT_LEAVE_MARKER: &str = "On Leave";

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings for one conversion run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Where the workbook is written
    pub output: PathBuf,
    /// Description stamped on empty weekdays
    pub leave_marker: String,
    /// Header names of the source columns
    pub columns: ColumnNames,
    /// Workbook look
    pub style: StyleConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            leave_marker: DEFAULT_LEAVE_MARKER.to_string(),
            columns: ColumnNames::default(),
            style: StyleConfig::default(),
        }
    }
}

impl ReportConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Override the output path
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }
}

/// Header names used to locate the source columns
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnNames {
    pub name: String,
    pub date: String,
    pub title: String,
    pub description: String,
    pub hours: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            name: "Emp Name".into(),
            date: "Date".into(),
            title: "Title".into(),
            description: "Description".into(),
            hours: "Total Hours".into(),
        }
    }
}

/// Font and column sizing of the generated workbook
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub font: String,
    /// Minimum width of the Description column, in characters
    pub description_width: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font: "Calibri".into(),
            description_width: 120.0,
        }
    }
}
