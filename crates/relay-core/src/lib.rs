//! # relay-core: Pure Domain Logic for Relay Inventory
//!
//! This crate is the **heart** of the Relay Inventory tracker. It contains
//! the domain model and business rules as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Relay Inventory Architecture                     │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │            Collaborator Layer (UI / transport / auth)         │ │
//! │  │        consumes the query + mutation contract, not us         │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                 relay-store (state + snapshots)               │ │
//! │  │   InventoryStore ── ledger ── alert engine ── BlobStore       │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │               ★ relay-core (THIS CRATE) ★                     │ │
//! │  │                                                               │ │
//! │  │   ┌──────────┐  ┌───────────┐  ┌────────────┐                │ │
//! │  │   │  types   │  │   error   │  │ validation │                │ │
//! │  │   │ Product  │  │ CoreError │  │   rules    │                │ │
//! │  │   │ Order …  │  │ taxonomy  │  │   checks   │                │ │
//! │  │   └──────────┘  └───────────┘  └────────────┘                │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO PERSISTENCE • NO GLOBALS • PURE FUNCTIONS       │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Product, Supplier, StockTransaction, …)
//! - [`error`] - Domain error taxonomy
//! - [`validation`] - Field-level validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, always
//! 2. **No I/O**: snapshot persistence lives in relay-store, not here
//! 3. **Integer Money**: prices are cents (i64), never floats
//! 4. **Explicit Errors**: typed enums, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use relay_core::{Product, ProductStatus};
//! use chrono::Utc;
//!
//! let product = Product {
//!     id: "p1".to_string(),
//!     name: "SFP+ 10G Transceiver".to_string(),
//!     category: "Optics".to_string(),
//!     price_cents: 4999,
//!     stock_level: 4,
//!     reorder_point: 5,
//!     status: ProductStatus::Active,
//!     created_at: Utc::now(),
//!     updated_at: Utc::now(),
//! };
//!
//! // 4 on hand, reorder at 5 → low stock
//! assert!(product.is_low_stock());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use relay_core::Product` instead of
// `use relay_core::types::Product`

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Display name substituted when a transaction references a product that
/// has since been deleted.
///
/// ## Why a constant?
/// Deleting a product does not cascade into the ledger. History rendering
/// resolves dangling product references to this name instead of failing.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown product";

/// Maximum length for entity display names.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length for free-text fields (transaction reasons, messages).
pub const MAX_TEXT_LEN: usize = 500;
