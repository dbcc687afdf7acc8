//! Source format readers.
//!
//! Each reader turns one file into a [`RawDocument`]; [`Format`] picks the
//! reader from the file extension.

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::path::Path;

use crate::constants::{CSV_EXTENSION, JSON_EXTENSION, YAML_EXTENSION, YML_EXTENSION};
use crate::error::{RadarError, Result};
use crate::types::RawDocument;

pub use self::csv::parse_csv_radar;
pub use self::json::parse_json_radar;
pub use self::yaml::parse_yaml_radar;

/// Source format of a radar file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Csv,
    Json,
    Yaml,
}

impl Format {
    /// Select the format for an extension given with its leading dot (".csv").
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext {
            CSV_EXTENSION => Ok(Format::Csv),
            JSON_EXTENSION => Ok(Format::Json),
            YML_EXTENSION | YAML_EXTENSION => Ok(Format::Yaml),
            other => Err(RadarError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_extension(&extname(path))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }

    /// Read `path` with the reader for this format.
    pub async fn read(self, path: &Path) -> Result<RawDocument> {
        match self {
            Format::Csv => parse_csv_radar(path).await,
            Format::Json => parse_json_radar(path).await,
            Format::Yaml => parse_yaml_radar(path).await,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extension including the leading dot, or "" when there is none.
pub fn extname(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
