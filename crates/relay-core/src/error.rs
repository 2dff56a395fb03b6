//! # Error Types
//!
//! Domain-specific error types for relay-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  relay-core errors (this file)                                      │
//! │  ├── CoreError        - Domain rule violations                      │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  relay-store errors (separate crate)                                │
//! │  ├── StoreError       - Store operation failures                    │
//! │  └── SnapshotError    - Persistence gateway failures                │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → StoreError → collaborator      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (entity kind, id, quantities)
//! 3. Errors are enum variants, never String
//! 4. None of these are fatal: every variant is caller-recoverable

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// These represent business rule violations. They abort an operation
/// before any state is written, so callers can always retry safely.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced record does not exist in its collection.
    ///
    /// ## When This Occurs
    /// - `add_transaction` with an unknown product id
    /// - updating or deleting a record that was already removed
    /// - order status change for an unknown order
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// StockOut would take the product below zero.
    ///
    /// ## When This Occurs
    /// Only when the store's backorder policy is disabled (the default).
    /// With backorders allowed, stock is permitted to go negative.
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// An order status change that the state machine forbids.
    ///
    /// Legal chain: Pending → Shipped → Delivered, Delivered terminal.
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        order_id: String,
        from: String,
        to: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotFound error for a given entity kind and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements. They are
/// raised before any mutation happens, so no partial write can occur.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive (> 0).
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative (>= 0).
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., malformed UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product: "SFP+ 10G Transceiver".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for SFP+ 10G Transceiver: available 3, requested 5"
        );

        let err = CoreError::not_found("Product", "p-404");
        assert_eq!(err.to_string(), "Product not found: p-404");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_status_transition_message() {
        let err = CoreError::InvalidStatusTransition {
            order_id: "o1".to_string(),
            from: "Delivered".to_string(),
            to: "Pending".to_string(),
        };
        assert_eq!(err.to_string(), "Order o1 cannot move from Delivered to Pending");
    }
}
