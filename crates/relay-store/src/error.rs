//! # Store Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Error Propagation                             │
//! │                                                                     │
//! │  ValidationError / CoreError (relay-core)                           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError (this module) ◄── SnapshotError (persistence gateway)   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Collaborator layer maps to its own surface (HTTP status, toast)    │
//! │                                                                     │
//! │  Every variant is recoverable. A Snapshot variant in particular     │
//! │  means the in-memory mutation already committed; retrying the       │
//! │  save is safe because saves are idempotent full overwrites.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use relay_core::{CoreError, ValidationError};
use thiserror::Error;

use crate::snapshot::SnapshotError;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A domain rule or lookup failure. No state was written.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Snapshot persistence failed.
    ///
    /// ## When This Occurs
    /// - the snapshot directory is unwritable or the disk is full
    /// - a stored blob is malformed or carries an unknown schema version
    ///
    /// On save, the in-memory state remains the source of truth.
    #[error("Snapshot persistence failed: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

impl StoreError {
    /// Creates a NotFound error for a given entity kind and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::Core(CoreError::not_found(entity, id))
    }

    /// Whether this error left a committed in-memory mutation behind
    /// (snapshot failures do; domain failures never write at all).
    pub fn is_persistence(&self) -> bool {
        matches!(self, StoreError::Snapshot(_))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
