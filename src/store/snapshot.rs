//! One-shot store bootstrap.
//!
//! Opens the store, seeds the bucket on first use, copies the whole bucket
//! into a `PathTable` and releases the store again. Later writes to the
//! store are only seen after a restart.

use std::path::Path;

use crate::routing::{PathTable, Record};
use crate::store::{PathStore, StoreError};

/// Entries written the first time a bucket is created.
pub fn seed_entries() -> Vec<Record> {
    vec![
        Record::new("/bolt", "https://github.com/boltdb/bolt"),
        Record::new("/boltdb", "https://github.com/boltdb"),
    ]
}

/// Seed-if-absent, then snapshot `bucket` of the store at `path`.
pub fn bootstrap(
    path: impl AsRef<Path>,
    bucket: &str,
    seeds: &[Record],
) -> Result<PathTable, StoreError> {
    let path = path.as_ref();
    let store = PathStore::open(path, bucket)?;

    if store.ensure_seeded(seeds)? {
        tracing::info!(
            store = %path.display(),
            bucket,
            entries = seeds.len(),
            "Bucket created and seeded"
        );
    } else {
        tracing::debug!(bucket, "Bucket already present, skipping seed");
    }

    let table = store.snapshot()?;
    tracing::info!(
        store = %path.display(),
        bucket,
        entries = table.len(),
        "Store snapshot loaded"
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_seeds_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let table = bootstrap(dir.path().join("db"), "path_urls", &seed_entries()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("/bolt"), Some("https://github.com/boltdb/bolt"));
        assert_eq!(table.get("/boltdb"), Some("https://github.com/boltdb"));
    }

    #[test]
    fn test_bootstrap_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("db");

        let first = bootstrap(&db, "path_urls", &seed_entries()).unwrap();
        let second = bootstrap(&db, "path_urls", &seed_entries()).unwrap();
        assert_eq!(first, second);

        // A different seed set on a later run changes nothing either.
        let third = bootstrap(&db, "path_urls", &[Record::new("/x", "https://x")]).unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn test_snapshot_sees_offline_edits_after_restart() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("db");
        bootstrap(&db, "path_urls", &seed_entries()).unwrap();

        {
            let store = PathStore::open(&db, "path_urls").unwrap();
            store.put("/new", "https://new.example").unwrap();
        }

        let table = bootstrap(&db, "path_urls", &seed_entries()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("/new"), Some("https://new.example"));
    }

    #[test]
    fn test_unopenable_store_is_fatal() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // A regular file where the database directory should be.
        let err = bootstrap(file.path(), "path_urls", &seed_entries()).unwrap_err();
        assert!(matches!(err, StoreError::Open { .. }));
    }
}
