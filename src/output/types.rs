//! Output types and configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Format of the exported file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// JSON array of rooms (default)
    #[default]
    Json,
    /// XML document rooted at `<rooms>`
    Xml,
}

impl ExportFormat {
    /// All supported formats
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Json, ExportFormat::Xml];

    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Xml => "xml",
        }
    }

    /// Uppercase label for log lines
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Xml => "XML",
        }
    }

    /// Whether `path` carries this format's extension (case-insensitive)
    pub fn matches_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension()))
    }

    /// Format named by a path's extension, if any
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.matches_path(path))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "xml" => Ok(ExportFormat::Xml),
            _ => Err(Error::unsupported_format(s)),
        }
    }
}

/// Configuration for the exporter's fallback destination
#[derive(Debug, Clone)]
pub struct ExportConfig {
    output_dir: PathBuf,
    file_stem: String,
    counter_start: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            file_stem: "default".to_string(),
            counter_start: 0,
        }
    }
}

impl ExportConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory fallback files are written to
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the fallback file name stem
    #[must_use]
    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }

    /// Set the counter value before the first fallback
    #[must_use]
    pub fn with_counter_start(mut self, start: u32) -> Self {
        self.counter_start = start;
        self
    }

    /// Get the fallback directory
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Get the fallback file name stem
    #[must_use]
    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    /// Get the initial counter value
    #[must_use]
    pub fn counter_start(&self) -> u32 {
        self.counter_start
    }
}

/// Result of a finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// File that was written
    pub path: PathBuf,
    /// Format it was written in
    pub format: ExportFormat,
    /// Number of rooms written
    pub rooms_written: usize,
}
