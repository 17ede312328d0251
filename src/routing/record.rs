//! Paths-file parsing.
//!
//! A paths file is an ordered list of `{path, url}` entries in either YAML
//! or JSON. The format is picked from the file extension alone; anything
//! other than `.yaml`, `.yml` or `.json` is a configuration error.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::loader::{read_file, ConfigError};

/// One configured redirect.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Record {
    /// Lookup key, matched exactly and case-sensitively.
    pub path: String,
    /// Redirect target. Never parsed.
    pub url: String,
}

impl Record {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

/// Supported paths-file serializations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// `- path: /x` / `  url: https://...`
    Yaml,
    /// `[{"path": "/x", "url": "https://..."}]`
    Json,
}

impl RecordFormat {
    /// Map a bare extension (no leading dot) to a format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Pick the format for a file from its declared extension.
    pub fn for_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        Self::from_extension(extension).ok_or_else(|| ConfigError::UnknownFormat {
            path: path.to_path_buf(),
            extension: extension.to_string(),
        })
    }

    /// Parse raw bytes into records, preserving file order.
    ///
    /// The whole input must have the expected shape; a single bad entry
    /// fails the parse.
    pub fn parse(self, bytes: &[u8]) -> Result<Vec<Record>, ConfigError> {
        match self {
            // An empty YAML document is an empty list.
            Self::Yaml if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            // A null document is an empty list too.
            Self::Yaml => {
                let records: Option<Vec<Record>> = serde_yaml::from_slice(bytes)?;
                Ok(records.unwrap_or_default())
            }
            Self::Json => {
                let records: Option<Vec<Record>> = serde_json::from_slice(bytes)?;
                Ok(records.unwrap_or_default())
            }
        }
    }
}

/// Parse `bytes` as `format`.
pub fn parse(bytes: &[u8], format: RecordFormat) -> Result<Vec<Record>, ConfigError> {
    format.parse(bytes)
}

/// Read a paths file and parse it according to its extension.
pub fn load_records(path: &Path) -> Result<Vec<Record>, ConfigError> {
    let format = RecordFormat::for_path(path)?;
    let bytes = read_file(path)?;
    let records = format.parse(&bytes)?;

    tracing::debug!(
        path = %path.display(),
        format = ?format,
        records = records.len(),
        "Paths file parsed"
    );

    Ok(records)
}
