//! # Snapshot Persistence Gateway
//!
//! Whole-collection save/load against a keyed durable blob store.
//!
//! ## Snapshot Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Snapshot Persistence                            │
//! │                                                                     │
//! │  InventoryStore mutation commits in memory                          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  save_collection("products", &products)                             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Snapshot envelope { schemaVersion: 1, records: [...] }             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  BlobStore::set("products", json)   ← whole value, no merge         │
//! │                                                                     │
//! │  On startup: load_collection per key; absent key → empty            │
//! │  collection; malformed or wrong-version blob → SnapshotError        │
//! │  (the store refuses to hydrate from garbage).                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Single-Writer Precondition
//! Blob keys are not designed for concurrent writers. Two processes (or
//! two instances) sharing a key can each re-load a stale snapshot and
//! overwrite the other's save, silently losing updates. Run exactly one
//! logical writer per key set; this is an accepted limitation, not a
//! bug the gateway tries to fix.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Schema version written into every snapshot envelope.
///
/// Bump on any breaking change to an entity's serialized shape; old
/// snapshots then fail loudly instead of half-deserializing.
pub const SCHEMA_VERSION: u32 = 1;

/// Blob keys for the five collections.
pub mod keys {
    pub const PRODUCTS: &str = "products";
    pub const SUPPLIERS: &str = "suppliers";
    pub const TRANSACTIONS: &str = "transactions";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const ORDERS: &str = "orders";
}

// =============================================================================
// Snapshot Error
// =============================================================================

/// Persistence gateway errors.
///
/// Recoverable by design: on a failed save the in-memory collection is
/// still authoritative and retrying is safe (saves are idempotent
/// full overwrites).
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Reading or writing the underlying blob failed.
    #[error("snapshot I/O for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The stored blob is not a valid snapshot envelope.
    ///
    /// ## When This Occurs
    /// - truncated or hand-edited snapshot file
    /// - a blob written by something other than this gateway
    #[error("snapshot for key '{key}' is malformed: {reason}")]
    Malformed { key: String, reason: String },

    /// The envelope parsed but carries a schema version we don't speak.
    #[error("snapshot for key '{key}' has schema version {found}, expected {expected}")]
    UnsupportedVersion {
        key: String,
        found: u32,
        expected: u32,
    },
}

// =============================================================================
// Blob Store Contract
// =============================================================================

/// Keyed durable blob storage: the store's only persistence dependency.
///
/// Values are opaque strings to the blob store; the typed envelope
/// checking happens in [`save_collection`] / [`load_collection`].
pub trait BlobStore: Send + Sync {
    /// Returns the blob for `key`, or `None` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError>;

    /// Overwrites the blob for `key` with `value` (no partial writes).
    fn set(&self, key: &str, value: &str) -> Result<(), SnapshotError>;
}

// =============================================================================
// File-Backed Blob Store
// =============================================================================

/// One JSON document per key under a directory: `<dir>/<key>.json`.
#[derive(Debug)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Opens (creating if necessary) a blob store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| SnapshotError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(FileBlobStore { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SnapshotError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SnapshotError> {
        // Write-then-rename so a crash mid-write never leaves a torn
        // snapshot where the real file used to be.
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        let path = self.path_for(key);

        fs::write(&tmp, value).map_err(|source| SnapshotError::Io {
            key: key.to_string(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| SnapshotError::Io {
            key: key.to_string(),
            source,
        })?;

        debug!(key = %key, bytes = value.len(), "Snapshot written");
        Ok(())
    }
}

// =============================================================================
// In-Memory Blob Store
// =============================================================================

/// HashMap-backed blob store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        let blobs = self.blobs.lock().expect("blob map mutex poisoned");
        Ok(blobs.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SnapshotError> {
        let mut blobs = self.blobs.lock().expect("blob map mutex poisoned");
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Typed Envelope
// =============================================================================

/// Versioned wrapper around a serialized collection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<T> {
    schema_version: u32,
    records: Vec<T>,
}

/// Borrowed twin of [`Snapshot`] used on the save path.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a, T> {
    schema_version: u32,
    records: &'a [T],
}

/// Serializes `records` into an envelope and overwrites `key`.
pub fn save_collection<T: Serialize>(
    blobs: &dyn BlobStore,
    key: &str,
    records: &[T],
) -> Result<(), SnapshotError> {
    let snapshot = SnapshotRef {
        schema_version: SCHEMA_VERSION,
        records,
    };
    let json = serde_json::to_string(&snapshot).map_err(|err| SnapshotError::Malformed {
        key: key.to_string(),
        reason: err.to_string(),
    })?;
    blobs.set(key, &json)
}

/// Loads and schema-checks the collection stored under `key`.
///
/// An absent key hydrates to an empty collection (first run is not an
/// error); a present-but-invalid blob is rejected.
pub fn load_collection<T: DeserializeOwned>(
    blobs: &dyn BlobStore,
    key: &str,
) -> Result<Vec<T>, SnapshotError> {
    let Some(json) = blobs.get(key)? else {
        debug!(key = %key, "No snapshot present, hydrating empty collection");
        return Ok(Vec::new());
    };

    let snapshot: Snapshot<T> =
        serde_json::from_str(&json).map_err(|err| SnapshotError::Malformed {
            key: key.to_string(),
            reason: err.to_string(),
        })?;

    if snapshot.schema_version != SCHEMA_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            key: key.to_string(),
            found: snapshot.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    debug!(key = %key, count = snapshot.records.len(), "Snapshot hydrated");
    Ok(snapshot.records)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip_preserves_order() {
        let blobs = MemoryBlobStore::new();
        let records = vec!["newest".to_string(), "older".to_string(), "oldest".to_string()];

        save_collection(&blobs, keys::TRANSACTIONS, &records).unwrap();
        let loaded: Vec<String> = load_collection(&blobs, keys::TRANSACTIONS).unwrap();

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_absent_key_yields_empty_collection() {
        let blobs = MemoryBlobStore::new();
        let loaded: Vec<String> = load_collection(&blobs, keys::PRODUCTS).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_malformed_blob_is_rejected() {
        let blobs = MemoryBlobStore::new();
        blobs.set(keys::PRODUCTS, "{ not json").unwrap();

        let result: Result<Vec<String>, _> = load_collection(&blobs, keys::PRODUCTS);
        assert!(matches!(result, Err(SnapshotError::Malformed { .. })));
    }

    #[test]
    fn test_missing_envelope_fields_are_rejected() {
        let blobs = MemoryBlobStore::new();
        // Valid JSON, but a bare array instead of the envelope.
        blobs.set(keys::ORDERS, "[1, 2, 3]").unwrap();

        let result: Result<Vec<i64>, _> = load_collection(&blobs, keys::ORDERS);
        assert!(matches!(result, Err(SnapshotError::Malformed { .. })));
    }

    #[test]
    fn test_wrong_schema_version_is_rejected() {
        let blobs = MemoryBlobStore::new();
        blobs
            .set(keys::PRODUCTS, r#"{"schemaVersion":99,"records":[]}"#)
            .unwrap();

        let result: Result<Vec<String>, _> = load_collection(&blobs, keys::PRODUCTS);
        assert!(matches!(
            result,
            Err(SnapshotError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_save_is_idempotent_overwrite() {
        let blobs = MemoryBlobStore::new();
        save_collection(&blobs, keys::PRODUCTS, &["a".to_string()]).unwrap();
        save_collection(&blobs, keys::PRODUCTS, &["a".to_string()]).unwrap();

        let loaded: Vec<String> = load_collection(&blobs, keys::PRODUCTS).unwrap();
        assert_eq!(loaded, vec!["a".to_string()]);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = FileBlobStore::open(dir.path()).unwrap();

        let records = vec![10i64, 20, 30];
        save_collection(&blobs, keys::ORDERS, &records).unwrap();

        // A second instance over the same directory reads the same data
        let reopened = FileBlobStore::open(dir.path()).unwrap();
        let loaded: Vec<i64> = load_collection(&reopened, keys::ORDERS).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_file_store_absent_key() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = FileBlobStore::open(dir.path()).unwrap();
        assert!(blobs.get("never-written").unwrap().is_none());
    }

    #[test]
    fn test_file_store_leaves_no_tmp_behind() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = FileBlobStore::open(dir.path()).unwrap();
        save_collection(&blobs, keys::PRODUCTS, &["x".to_string()]).unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["products.json".to_string()]);
    }
}
