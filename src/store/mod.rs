//! Embedded persistent store for path mappings.
//!
//! # Data Flow
//! ```text
//! sled database directory
//!     ├── default tree: bucket registry ("bucket:<name>" → "")
//!     └── tree <bucket>: path bytes → url bytes
//!
//! startup:  snapshot::bootstrap → open → seed-if-unregistered → snapshot → drop
//! offline:  shortener-admin → open → put/remove/list → drop
//! ```
//!
//! # Design Decisions
//! - Bucket registration and seeding commit in one transaction, so seeds are
//!   written at most once for the lifetime of the database
//! - Keys and values are UTF-8; anything else fails the snapshot
//! - The serving process never holds the store open

pub mod snapshot;

use std::path::{Path, PathBuf};

use sled::transaction::{ConflictableTransactionResult, TransactionError};
use sled::Transactional;
use thiserror::Error;

use crate::routing::{PathTable, Record};

pub use snapshot::{bootstrap, seed_entries};

/// Bucket used when none is configured.
pub const DEFAULT_BUCKET: &str = "path_urls";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not open store at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: sled::Error,
    },

    #[error("could not create bucket {bucket:?}: {source}")]
    Bucket {
        bucket: String,
        #[source]
        source: sled::Error,
    },

    #[error("could not seed bucket {bucket:?}: {source}")]
    Seed {
        bucket: String,
        #[source]
        source: TransactionError<sled::Error>,
    },

    #[error("could not check registration of bucket {bucket:?}: {source}")]
    Registry {
        bucket: String,
        #[source]
        source: sled::Error,
    },

    #[error("could not read bucket {bucket:?}: {source}")]
    Snapshot {
        bucket: String,
        #[source]
        source: sled::Error,
    },

    #[error("bucket {bucket:?} holds a non UTF-8 entry under key {key:?}")]
    Encoding { bucket: String, key: String },

    #[error("write to bucket {bucket:?} failed: {source}")]
    Write {
        bucket: String,
        #[source]
        source: sled::Error,
    },
}

/// An open handle on one bucket of the store.
pub struct PathStore {
    db: sled::Db,
    bucket: sled::Tree,
    bucket_name: String,
}

impl PathStore {
    /// Open (or create) the database at `path` and its `bucket` tree.
    pub fn open(path: impl AsRef<Path>, bucket: &str) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let db = sled::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let tree = db.open_tree(bucket).map_err(|source| StoreError::Bucket {
            bucket: bucket.to_string(),
            source,
        })?;

        Ok(Self {
            db,
            bucket: tree,
            bucket_name: bucket.to_string(),
        })
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    fn registry_key(&self) -> Vec<u8> {
        format!("bucket:{}", self.bucket_name).into_bytes()
    }

    /// Whether the bucket has been registered (and therefore seeded).
    pub fn is_registered(&self) -> Result<bool, StoreError> {
        self.db
            .contains_key(self.registry_key())
            .map_err(|source| StoreError::Registry {
                bucket: self.bucket_name.clone(),
                source,
            })
    }

    /// Register the bucket and write `seeds`, unless it is already registered.
    ///
    /// Returns `true` when this call did the seeding.
    pub fn ensure_seeded(&self, seeds: &[Record]) -> Result<bool, StoreError> {
        let registry_key = self.registry_key();
        let meta: &sled::Tree = &self.db;

        let seeded = (meta, &self.bucket)
            .transaction(|(meta, bucket)| -> ConflictableTransactionResult<bool, sled::Error> {
                if meta.get(&registry_key)?.is_some() {
                    return Ok(false);
                }
                meta.insert(registry_key.as_slice(), &b""[..])?;
                for record in seeds {
                    bucket.insert(record.path.as_bytes(), record.url.as_bytes())?;
                }
                Ok(true)
            })
            .map_err(|source| StoreError::Seed {
                bucket: self.bucket_name.clone(),
                source,
            })?;

        if seeded {
            self.flush()?;
        }
        Ok(seeded)
    }

    /// Every entry in key order.
    pub fn entries(&self) -> Result<Vec<Record>, StoreError> {
        self.bucket
            .iter()
            .map(|entry| {
                let (key, value) = entry.map_err(|source| self.snapshot_error(source))?;
                self.decode(&key, &value)
            })
            .collect()
    }

    /// Materialize the bucket into a table.
    pub fn snapshot(&self) -> Result<PathTable, StoreError> {
        Ok(PathTable::from_records(self.entries()?))
    }

    /// Insert or overwrite one mapping. Returns the previous URL.
    pub fn put(&self, path: &str, url: &str) -> Result<Option<String>, StoreError> {
        let previous = self
            .bucket
            .insert(path.as_bytes(), url.as_bytes())
            .map_err(|source| self.write_error(source))?;
        self.flush()?;
        self.decode_previous(path, previous)
    }

    /// Delete one mapping. Returns the removed URL.
    pub fn remove(&self, path: &str) -> Result<Option<String>, StoreError> {
        let previous = self
            .bucket
            .remove(path.as_bytes())
            .map_err(|source| self.write_error(source))?;
        self.flush()?;
        self.decode_previous(path, previous)
    }

    fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map(|_| ())
            .map_err(|source| self.write_error(source))
    }

    fn decode(&self, key: &[u8], value: &[u8]) -> Result<Record, StoreError> {
        match (std::str::from_utf8(key), std::str::from_utf8(value)) {
            (Ok(path), Ok(url)) => Ok(Record::new(path, url)),
            _ => Err(StoreError::Encoding {
                bucket: self.bucket_name.clone(),
                key: String::from_utf8_lossy(key).into_owned(),
            }),
        }
    }

    fn decode_previous(
        &self,
        path: &str,
        previous: Option<sled::IVec>,
    ) -> Result<Option<String>, StoreError> {
        previous
            .map(|value| self.decode(path.as_bytes(), &value).map(|record| record.url))
            .transpose()
    }

    fn snapshot_error(&self, source: sled::Error) -> StoreError {
        StoreError::Snapshot {
            bucket: self.bucket_name.clone(),
            source,
        }
    }

    fn write_error(&self, source: sled::Error) -> StoreError {
        StoreError::Write {
            bucket: self.bucket_name.clone(),
            source,
        }
    }
}
