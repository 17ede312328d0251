//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ShortenerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
///
/// Covers both the shortener's own TOML config and the paths file read by
/// the file layer. Every variant is fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can't read file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown file extension {extension:?} for {}", .path.display())]
    UnknownFormat { path: PathBuf, extension: String },

    #[error("invalid YAML paths: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON paths: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a whole file, tagging failures with the path.
pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>, ConfigError> {
    fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ShortenerConfig, ConfigError> {
    let bytes = read_file(path)?;
    let content = String::from_utf8_lossy(&bytes);
    let config: ShortenerConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
