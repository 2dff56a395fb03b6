//! # relay-store: State & Persistence for Relay Inventory
//!
//! This crate owns the inventory collections, the stock transaction
//! ledger, the low-stock alert engine, and snapshot persistence.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Relay Inventory Data Flow                       │
//! │                                                                     │
//! │  Collaborator call (add_transaction, list_products, …)              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                   relay-store (THIS CRATE)                    │ │
//! │  │                                                               │ │
//! │  │   ┌──────────────┐   ┌─────────────┐   ┌──────────────────┐  │ │
//! │  │   │InventoryStore│   │ alert engine│   │ snapshot gateway │  │ │
//! │  │   │  (store/)    │──►│  (derived)  │──►│  (BlobStore)     │  │ │
//! │  │   │ CRUD + ledger│   │  LowStock   │   │  products.json … │  │ │
//! │  │   └──────────────┘   └─────────────┘   └──────────────────┘  │ │
//! │  │                                                               │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │   Keyed blob storage (one JSON snapshot per collection)       │ │
//! │  │   <snapshot_dir>/products.json, suppliers.json, …             │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The injected `InventoryStore` and all mutations
//! - [`snapshot`] - Persistence gateway (`BlobStore`, typed envelopes)
//! - [`config`] - Store configuration (`RELAY_*` env overrides)
//! - [`clock`], [`ids`] - Injected timestamp and identifier seams
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use relay_store::{FileBlobStore, InventoryStore, NewProduct, StoreConfig};
//!
//! # fn main() -> Result<(), relay_store::StoreError> {
//! let config = StoreConfig::from_env();
//! let blobs = FileBlobStore::open(&config.snapshot_dir)?;
//! let mut store = InventoryStore::open(config, Box::new(blobs))?;
//!
//! let product = store.add_product(NewProduct {
//!     name: "Edge Router 4-port".to_string(),
//!     category: "Routers".to_string(),
//!     price_cents: 129_900,
//!     stock_level: 6,
//!     reorder_point: 2,
//! })?;
//!
//! assert_eq!(store.list_products().len(), 1);
//! # let _ = product;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod config;
pub mod error;
pub mod ids;
pub mod snapshot;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use clock::{Clock, SystemClock};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use ids::{IdSource, UuidSource};
pub use snapshot::{BlobStore, FileBlobStore, MemoryBlobStore, SnapshotError};
pub use store::{
    Collection, InventoryStore, LedgerEntry, NewOrder, NewProduct, NewSupplier, StoreState,
};
