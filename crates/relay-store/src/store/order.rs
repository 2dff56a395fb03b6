//! # Order Operations
//!
//! Supplier orders and their status machine.
//!
//! ## Status Machine
//! ```text
//! Pending ──► Shipped ──► Delivered (terminal)
//! ```
//! Skips, reversals and self-loops are conflicts. "Overdue" is the
//! `get_overdue_orders` query over non-Delivered orders past their
//! expected date; it is never stored on the record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use relay_core::{CoreError, Order, OrderStatus};

use crate::error::{StoreError, StoreResult};

use super::{Collection, InventoryStore};

/// Input for placing an order with a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub supplier_id: String,
    pub expected_date: DateTime<Utc>,
}

impl InventoryStore {
    /// Places an order and appends it to the supplier's history.
    ///
    /// The supplier must exist; dangling supplier references can only
    /// arise later, via supplier deletion.
    pub fn add_order(&mut self, new: NewOrder) -> StoreResult<Order> {
        if self.get_supplier(&new.supplier_id).is_none() {
            return Err(StoreError::not_found("Supplier", &new.supplier_id));
        }

        let now = self.now();
        let order = Order {
            id: self.next_id(),
            supplier_id: new.supplier_id.clone(),
            status: OrderStatus::Pending,
            expected_date: new.expected_date,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %order.id, supplier = %order.supplier_id, "Placing order");

        self.orders.push(order.clone());

        // Orders double-write: the record itself plus the supplier's
        // append-only history.
        if let Some(supplier) = self.suppliers.iter_mut().find(|s| s.id == new.supplier_id) {
            supplier.order_history.push(order.id.clone());
            supplier.updated_at = now;
        }

        self.commit(&[Collection::Orders, Collection::Suppliers])?;
        Ok(order)
    }

    /// Advances an order along the status machine.
    ///
    /// Illegal transitions fail with a conflict before any write.
    pub fn update_order_status(&mut self, id: &str, next: OrderStatus) -> StoreResult<Order> {
        let now = self.now();
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| StoreError::not_found("Order", id))?;

        if !order.status.can_transition_to(next) {
            return Err(StoreError::Core(CoreError::InvalidStatusTransition {
                order_id: id.to_string(),
                from: order.status.as_str().to_string(),
                to: next.as_str().to_string(),
            }));
        }

        order.status = next;
        order.updated_at = now;

        let updated = order.clone();
        debug!(id = %id, status = next.as_str(), "Order status advanced");

        self.commit(&[Collection::Orders])?;
        Ok(updated)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
