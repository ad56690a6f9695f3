//! Loader settings.
//!
//! Settings are read from a JSON file; every field is optional and falls back
//! to the defaults below.
//!
//! ```json
//! {
//!   "null_tokens": ["", "NA", "n/a"],
//!   "duplicate_headers": "Reject",
//!   "preview_rows": 50
//! }
//! ```

use crate::error::{AutovizError, Result, ResultExt as _};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Format name that selects RFC 3339 parsing instead of a strftime pattern.
pub const RFC3339_FORMAT: &str = "rfc3339";

pub const DEFAULT_NULL_TOKENS: [&str; 8] = ["NA", "N/A", "NaN", "nan", "null", "NULL", "None", "-"];

pub const DEFAULT_DATETIME_FORMATS: [&str; 9] = [
    RFC3339_FORMAT,
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
];

/// What to do when two header cells carry the same name.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DuplicateHeaders {
    /// Append `_1`, `_2`, ... to later occurrences.
    #[default]
    Rename,
    /// Fail the load with a parse error.
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Cell values treated as null in addition to empty cells.
    pub null_tokens: Vec<String>,
    /// Datetime formats tried in order during type inference.
    pub datetime_formats: Vec<String>,
    pub duplicate_headers: DuplicateHeaders,
    /// Drop rows in which every cell is null.
    pub drop_empty_rows: bool,
    /// Rows shown by the data preview (default: 100)
    pub preview_rows: usize,
    /// Optional file that receives a copy of the log output.
    pub log_file: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            null_tokens: DEFAULT_NULL_TOKENS.iter().map(|s| (*s).to_owned()).collect(),
            datetime_formats: DEFAULT_DATETIME_FORMATS
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            duplicate_headers: DuplicateHeaders::Rename,
            drop_empty_rows: true,
            preview_rows: 100,
            log_file: None,
        }
    }
}

impl AnalysisConfig {
    /// Reads and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid JSON, or fails
    /// [`AnalysisConfig::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`AutovizError::Config`] for a zero preview size or a
    /// malformed datetime pattern.
    pub fn validate(&self) -> Result<()> {
        if self.preview_rows == 0 {
            return Err(AutovizError::Config(
                "preview_rows must be greater than zero".to_owned(),
            ));
        }

        for fmt in &self.datetime_formats {
            if fmt == RFC3339_FORMAT {
                continue;
            }
            if fmt.trim().is_empty() || StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
                return Err(AutovizError::Config(format!(
                    "invalid datetime format '{fmt}'"
                )));
            }
        }

        Ok(())
    }

    pub fn is_null_token(&self, value: &str) -> bool {
        value.is_empty() || self.null_tokens.iter().any(|t| t == value)
    }
}
