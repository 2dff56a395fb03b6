//! # Identifier Seam
//!
//! The store consumes an identifier generator rather than minting UUIDs
//! inline, so tests can assert on stable ids.

use uuid::Uuid;

/// Source of unique record identifiers.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// UUID v4 identifiers: globally unique without coordination.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
