//! # Domain Types
//!
//! Core domain entities for Relay Inventory.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌────────────────┐  ┌──────────────────┐  ┌────────────────┐      │
//! │  │    Product     │  │ StockTransaction │  │  Notification  │      │
//! │  │  ────────────  │  │  ──────────────  │  │  ────────────  │      │
//! │  │  id (UUID)     │  │  id (UUID)       │  │  id (UUID)     │      │
//! │  │  stock_level   │  │  product_id (FK) │  │  kind          │      │
//! │  │  reorder_point │  │  kind / quantity │  │  is_read       │      │
//! │  │  price_cents   │  │  IMMUTABLE       │  │  product_id?   │      │
//! │  └────────────────┘  └──────────────────┘  └────────────────┘      │
//! │                                                                     │
//! │  ┌────────────────┐  ┌──────────────────┐                          │
//! │  │    Supplier    │  │      Order       │                          │
//! │  │  ────────────  │  │  ──────────────  │                          │
//! │  │  id (UUID)     │  │  id (UUID)       │                          │
//! │  │  order_history │  │  supplier_id(FK) │                          │
//! │  │  contact       │  │  Pending→Shipped │                          │
//! │  └────────────────┘  │  →Delivered      │                          │
//! │                      └──────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Conservation
//! `Product.stock_level` is only ever changed by the transaction
//! processor: it always equals the level at creation plus the net effect
//! of the ledger. Patch updates deliberately have no stock field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// Lifecycle status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Available for stock movements.
    Active,
    /// Kept for history; no longer ordered from suppliers.
    Discontinued,
}

impl Default for ProductStatus {
    fn default() -> Self {
        ProductStatus::Active
    }
}

/// An inventory item (router, transceiver, patch cable, …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in inventory views and alert messages.
    pub name: String,

    /// Free-form category ("Routers", "Optics", "Cabling", …).
    pub category: String,

    /// Unit price in cents (smallest currency unit). Never a float.
    pub price_cents: i64,

    /// Current on-hand quantity. Changed only by the ledger.
    pub stock_level: i64,

    /// Threshold at or below which the product is considered low-stock.
    pub reorder_point: i64,

    /// Lifecycle status.
    pub status: ProductStatus,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Checks whether the product sits at or below its reorder point.
    ///
    /// This is the single definition of "low stock"; the alert engine
    /// and the `get_low_stock_products` query both go through it.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock_level <= self.reorder_point
    }
}

/// Partial update for a product.
///
/// ## Design Note
/// There is intentionally no `stock_level` field here: stock changes go
/// through the transaction processor so the ledger invariant holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub reorder_point: Option<i64>,
    pub status: Option<ProductStatus>,
}

// =============================================================================
// Supplier
// =============================================================================

/// A vendor products are ordered from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,

    pub name: String,

    /// Primary contact at the vendor.
    pub contact_person: String,

    /// Ids of orders placed with this supplier, in placement order.
    pub order_history: Vec<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Partial update for a supplier. Order history is append-only and
/// maintained by the store, so it is not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub contact_person: Option<String>,
}

// =============================================================================
// Stock Transaction
// =============================================================================

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Goods received: stock_level increases by quantity.
    StockIn,
    /// Goods issued: stock_level decreases by quantity.
    StockOut,
}

impl TransactionKind {
    /// Signed stock delta for a movement of `quantity` units.
    #[inline]
    pub fn signed_delta(&self, quantity: i64) -> i64 {
        match self {
            TransactionKind::StockIn => quantity,
            TransactionKind::StockOut => -quantity,
        }
    }
}

/// One immutable entry in the stock ledger.
///
/// ## Immutability
/// Transactions are append-only: never edited, never deleted, even when
/// the referenced product is removed. The ledger is kept newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTransaction {
    pub id: String,

    /// Product this movement applies to. May dangle after the product
    /// is deleted; display code resolves that to "Unknown product".
    pub product_id: String,

    pub kind: TransactionKind,

    /// Units moved. Always positive; direction comes from `kind`.
    pub quantity: i64,

    /// Free-text reason ("sale", "restock", "RMA return", …).
    pub reason: String,

    /// Who recorded the movement.
    pub user_id: String,

    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Notification
// =============================================================================

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Derived by the alert engine when stock hits the reorder point.
    LowStock,
    /// An order past its expected date (created explicitly).
    OverdueOrder,
    /// Anything else worth telling the operator.
    Info,
}

/// An alert or informational message for the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,

    pub kind: NotificationKind,

    pub title: String,

    pub message: String,

    /// Flipped (idempotently) by `mark_notification_as_read`.
    pub is_read: bool,

    /// Product a LowStock alert refers to. Matching alerts by message
    /// text would break on product rename, so the id is carried too.
    pub product_id: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// True for an unread LowStock alert referencing `product_id`.
    ///
    /// The alert uniqueness invariant (at most one unread LowStock per
    /// low product) is checked through this predicate.
    #[inline]
    pub fn is_open_low_stock_for(&self, product_id: &str) -> bool {
        self.kind == NotificationKind::LowStock
            && !self.is_read
            && self.product_id.as_deref() == Some(product_id)
    }
}

// =============================================================================
// Order
// =============================================================================

/// Status of a supplier order.
///
/// ## State Machine
/// ```text
/// Pending ──► Shipped ──► Delivered (terminal)
/// ```
/// "Overdue" is a query over non-Delivered orders past their expected
/// date, not a stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        )
    }

    /// Display name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// A purchase order placed with a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,

    pub supplier_id: String,

    pub status: OrderStatus,

    /// When delivery is expected. Non-Delivered orders past this date
    /// are classified overdue by `get_overdue_orders`.
    pub expected_date: DateTime<Utc>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Whether the order counts as overdue at instant `now`.
    #[inline]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != OrderStatus::Delivered && self.expected_date < now
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn product_at(stock: i64, reorder: i64) -> Product {
        Product {
            id: "p1".to_string(),
            name: "CAT6 Patch Cable 2m".to_string(),
            category: "Cabling".to_string(),
            price_cents: 499,
            stock_level: stock,
            reorder_point: reorder,
            status: ProductStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_boundary() {
        assert!(product_at(5, 5).is_low_stock()); // at the point counts
        assert!(product_at(0, 5).is_low_stock());
        assert!(product_at(-2, 0).is_low_stock()); // backorder territory
        assert!(!product_at(6, 5).is_low_stock());
    }

    #[test]
    fn test_transaction_kind_delta() {
        assert_eq!(TransactionKind::StockIn.signed_delta(7), 7);
        assert_eq!(TransactionKind::StockOut.signed_delta(7), -7);
    }

    #[test]
    fn test_order_status_machine() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));

        // No skips, no backwards moves, no self loops, terminal stays terminal
        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Shipped.can_transition_to(Pending));
        assert!(!Delivered.can_transition_to(Shipped));
        assert!(!Delivered.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_order_overdue_query_logic() {
        let now = Utc::now();
        let order = Order {
            id: "o1".to_string(),
            supplier_id: "s1".to_string(),
            status: OrderStatus::Pending,
            expected_date: now - Duration::days(2),
            created_at: now - Duration::days(10),
            updated_at: now - Duration::days(10),
        };
        assert!(order.is_overdue(now));

        // Delivered orders are never overdue, even past the date
        let delivered = Order {
            status: OrderStatus::Delivered,
            ..order.clone()
        };
        assert!(!delivered.is_overdue(now));

        // Future expected date is not overdue
        let upcoming = Order {
            expected_date: now + Duration::days(3),
            ..order
        };
        assert!(!upcoming.is_overdue(now));
    }

    #[test]
    fn test_open_low_stock_predicate() {
        let note = Notification {
            id: "n1".to_string(),
            kind: NotificationKind::LowStock,
            title: "Low stock alert".to_string(),
            message: "CAT6 Patch Cable 2m is low".to_string(),
            is_read: false,
            product_id: Some("p1".to_string()),
            timestamp: Utc::now(),
        };
        assert!(note.is_open_low_stock_for("p1"));
        assert!(!note.is_open_low_stock_for("p2"));

        let read = Notification {
            is_read: true,
            ..note.clone()
        };
        assert!(!read.is_open_low_stock_for("p1"));

        let info = Notification {
            kind: NotificationKind::Info,
            ..note
        };
        assert!(!info.is_open_low_stock_for("p1"));
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let json = serde_json::to_value(product_at(10, 5)).unwrap();
        assert!(json.get("stockLevel").is_some());
        assert!(json.get("reorderPoint").is_some());
        assert!(json.get("priceCents").is_some());
        assert!(json.get("stock_level").is_none());
    }
}
