//! Startup orchestration.
//!
//! # Responsibilities
//! - Parse the paths file
//! - Bootstrap and snapshot the persistent store
//! - Compose store → file → literal → default into one chain
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Blocking I/O; call before the listener is bound

use std::path::Path;

use thiserror::Error;

use crate::config::{ConfigError, ShortenerConfig};
use crate::routing::{compose, default_responder, load_records, Chain, ChainError, PathTable};
use crate::store::{bootstrap, seed_entries, StoreError};

/// Layer backed by the persistent store snapshot.
pub const STORE_LAYER: &str = "store";
/// Layer backed by the paths file.
pub const FILE_LAYER: &str = "file";
/// Layer backed by `literal_paths` from the configuration.
pub const LITERAL_LAYER: &str = "literal";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Materialize every source and compose the serving chain.
pub fn build_chain(config: &ShortenerConfig) -> Result<Chain, StartupError> {
    let file_table = PathTable::from_records(load_records(Path::new(
        &config.sources.paths_file,
    ))?);
    let literal_table = PathTable::from_records(config.literal_paths.0.iter().cloned());
    let store_table = bootstrap(
        &config.sources.store_path,
        &config.sources.bucket,
        &seed_entries(),
    )?;

    let chain = compose(
        [
            (STORE_LAYER, store_table),
            (FILE_LAYER, file_table),
            (LITERAL_LAYER, literal_table),
        ],
        default_responder(),
    )?;

    for layer in chain.layers() {
        tracing::info!(
            layer = layer.name(),
            entries = layer.table().len(),
            "Layer ready"
        );
    }

    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Record, Resolution};
    use std::io::Write;

    fn config_with(paths: &tempfile::NamedTempFile, db: &Path) -> ShortenerConfig {
        let mut config = ShortenerConfig::default();
        config.sources.paths_file = paths.path().to_string_lossy().into_owned();
        config.sources.store_path = db.to_string_lossy().into_owned();
        config
    }

    #[test]
    fn test_full_chain() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            paths,
            "- path: /bolt\n  url: https://file.example/bolt\n- path: /yaml-godoc\n  url: https://file.example/yaml"
        )
        .unwrap();

        let chain = build_chain(&config_with(&paths, &dir.path().join("db"))).unwrap();
        assert_eq!(chain.layer_names(), vec![STORE_LAYER, FILE_LAYER, LITERAL_LAYER]);

        assert_eq!(
            chain.resolve("/bolt").resolution,
            Resolution::redirect("https://github.com/boltdb/bolt")
        );
        assert_eq!(chain.resolve("/yaml-godoc").layer, Some(FILE_LAYER));
        assert_eq!(
            chain.resolve("/urlshort-godoc").resolution,
            Resolution::redirect("https://godoc.org/github.com/gophercises/urlshort")
        );
        assert_eq!(chain.resolve("/nope").resolution, Resolution::NotFound);
    }

    #[test]
    fn test_literal_paths_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let paths = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        // Empty JSON file is malformed.
        let mut config = config_with(&paths, &dir.path().join("db"));
        assert!(matches!(
            build_chain(&config),
            Err(StartupError::Config(ConfigError::Json(_)))
        ));

        std::fs::write(paths.path(), "[]").unwrap();
        config.literal_paths.0 = vec![Record::new("/lit", "https://lit.example")];
        let chain = build_chain(&config).unwrap();
        assert_eq!(chain.resolve("/lit").layer, Some(LITERAL_LAYER));
        assert_eq!(chain.resolve("/yaml-godoc").resolution, Resolution::NotFound);
    }

    #[test]
    fn test_unknown_extension_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let paths = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let err = build_chain(&config_with(&paths, &dir.path().join("db"))).unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::UnknownFormat { .. })));
    }
}
