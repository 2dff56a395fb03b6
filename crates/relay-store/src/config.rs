//! # Store Configuration
//!
//! Configuration for the inventory store, loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`RELAY_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Inventory store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Directory holding one JSON snapshot file per collection key.
    pub snapshot_dir: PathBuf,

    /// Allow StockOut to take stock below zero (backorders).
    ///
    /// Off by default: an overdraft fails with `InsufficientStock`
    /// before the ledger entry is written.
    pub allow_backorders: bool,
}

impl Default for StoreConfig {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        StoreConfig {
            snapshot_dir: PathBuf::from("./relay-data"),
            allow_backorders: false,
        }
    }
}

impl StoreConfig {
    /// Creates a StoreConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `RELAY_SNAPSHOT_DIR`: Override snapshot directory
    /// - `RELAY_ALLOW_BACKORDERS`: "1" or "true" enables backorders
    pub fn from_env() -> Self {
        let mut config = StoreConfig::default();

        if let Ok(dir) = std::env::var("RELAY_SNAPSHOT_DIR") {
            config.snapshot_dir = PathBuf::from(dir);
        }

        if let Ok(flag) = std::env::var("RELAY_ALLOW_BACKORDERS") {
            config.allow_backorders = matches!(flag.as_str(), "1" | "true" | "TRUE");
        }

        config
    }

    /// Builder-style override for the backorder policy.
    pub fn with_backorders(mut self, allow: bool) -> Self {
        self.allow_backorders = allow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert!(!config.allow_backorders);
        assert_eq!(config.snapshot_dir, PathBuf::from("./relay-data"));
    }

    #[test]
    fn test_with_backorders() {
        let config = StoreConfig::default().with_backorders(true);
        assert!(config.allow_backorders);
    }
}
