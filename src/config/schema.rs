//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the shortener.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::Record;

/// Root configuration for the URL shortener.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ShortenerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where the file and store layers read their mappings from.
    pub sources: SourcesConfig,

    /// Records for the in-process literal-table layer.
    pub literal_paths: LiteralPaths,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ListenerConfig {
    /// Replace the port of the bind address, keeping the host part.
    pub fn set_port(&mut self, port: u16) {
        let host = match self.bind_address.rsplit_once(':') {
            Some((host, _)) => host.to_string(),
            None => self.bind_address.clone(),
        };
        self.bind_address = format!("{}:{}", host, port);
    }
}

/// Mapping sources backing the file and store layers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Paths file (`.yaml`, `.yml` or `.json`).
    pub paths_file: String,

    /// Directory of the embedded store.
    pub store_path: String,

    /// Bucket holding the persistent mappings.
    pub bucket: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            paths_file: "paths.yaml".to_string(),
            store_path: "url_shortener.db".to_string(),
            bucket: crate::store::DEFAULT_BUCKET.to_string(),
        }
    }
}

/// Literal-table records, in declaration order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LiteralPaths(pub Vec<Record>);

impl Default for LiteralPaths {
    fn default() -> Self {
        Self(vec![
            Record::new(
                "/urlshort-godoc",
                "https://godoc.org/github.com/gophercises/urlshort",
            ),
            Record::new("/yaml-godoc", "https://godoc.org/gopkg.in/yaml.v2"),
        ])
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShortenerConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.sources.paths_file, "paths.yaml");
        assert_eq!(config.sources.bucket, "path_urls");
        assert_eq!(config.literal_paths.0.len(), 2);
    }

    #[test]
    fn test_partial_toml() {
        let config: ShortenerConfig = toml::from_str(
            r#"
            [sources]
            paths_file = "paths.json"

            [[literal_paths]]
            path = "/docs"
            url = "https://docs.rs"
            "#,
        )
        .unwrap();

        assert_eq!(config.sources.paths_file, "paths.json");
        assert_eq!(config.sources.store_path, "url_shortener.db");
        assert_eq!(config.literal_paths.0, vec![Record::new("/docs", "https://docs.rs")]);
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_set_port() {
        let mut listener = ListenerConfig::default();
        listener.set_port(9000);
        assert_eq!(listener.bind_address, "0.0.0.0:9000");

        let mut listener = ListenerConfig {
            bind_address: "[::1]:80".into(),
        };
        listener.set_port(8081);
        assert_eq!(listener.bind_address, "[::1]:8081");
    }
}
