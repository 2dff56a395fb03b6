//! # Notification Engine
//!
//! Derived low-stock alerts plus explicit notification management.
//!
//! ## Derivation Rule
//! ```text
//! after every commit that touched the Product collection:
//!     for every product with stock_level <= reorder_point:
//!         if no UNREAD LowStock alert references it:
//!             create one (named after the product)
//! ```
//!
//! Two deliberate asymmetries, both preserved from the system this
//! replaces:
//! - while an unread alert is outstanding, the rule never duplicates it
//! - recovery above the reorder point does NOT retract the alert; the
//!   operator dismisses it by marking it read

use tracing::{debug, info};

use relay_core::{validation, Notification, NotificationKind};

use crate::error::{StoreError, StoreResult};

use super::{Collection, InventoryStore};

impl InventoryStore {
    /// Ensures every low product has exactly one unread LowStock alert.
    ///
    /// Returns how many alerts were created. Called by the post-commit
    /// hook; not public API.
    pub(crate) fn derive_low_stock_alerts(&mut self) -> usize {
        let now = self.now();

        // Collect first: pushing while iterating products would fight
        // the borrow checker and re-deriving over fresh alerts is moot.
        let missing: Vec<(String, String, i64, i64)> = self
            .products
            .iter()
            .filter(|p| p.is_low_stock())
            .filter(|p| {
                !self
                    .notifications
                    .iter()
                    .any(|n| n.is_open_low_stock_for(&p.id))
            })
            .map(|p| (p.id.clone(), p.name.clone(), p.stock_level, p.reorder_point))
            .collect();

        let created = missing.len();
        for (product_id, name, stock, reorder) in missing {
            let alert = Notification {
                id: self.next_id(),
                kind: NotificationKind::LowStock,
                title: "Low stock alert".to_string(),
                message: format!(
                    "{name} is at or below its reorder point ({stock} on hand, reorder at {reorder})"
                ),
                is_read: false,
                product_id: Some(product_id.clone()),
                timestamp: now,
            };

            info!(product = %product_id, stock, reorder, "Low stock alert raised");
            self.notifications.push(alert);
        }

        created
    }

    /// Creates an explicit notification (Info, OverdueOrder, …).
    pub fn add_notification(
        &mut self,
        kind: NotificationKind,
        title: &str,
        message: &str,
    ) -> StoreResult<Notification> {
        validation::validate_name("title", title)?;
        validation::validate_text("message", message)?;

        let notification = Notification {
            id: self.next_id(),
            kind,
            title: title.trim().to_string(),
            message: message.trim().to_string(),
            is_read: false,
            product_id: None,
            timestamp: self.now(),
        };

        debug!(id = %notification.id, ?kind, "Adding notification");

        self.notifications.push(notification.clone());
        self.commit(&[Collection::Notifications])?;

        Ok(notification)
    }

    /// Marks a notification read.
    ///
    /// Idempotent: marking an already-read notification changes nothing
    /// and is not an error. An unknown id is NotFound.
    pub fn mark_notification_as_read(&mut self, id: &str) -> StoreResult<()> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| StoreError::not_found("Notification", id))?;

        if notification.is_read {
            return Ok(());
        }

        notification.is_read = true;
        debug!(id = %id, "Notification marked read");

        self.commit(&[Collection::Notifications])
    }

    /// Empties the notification collection unconditionally.
    ///
    /// This does not re-run the derivation: still-low products regain
    /// their alerts on their next product-touching commit, not here.
    pub fn clear_all_notifications(&mut self) -> StoreResult<()> {
        let cleared = self.notifications.len();
        self.notifications.clear();

        debug!(cleared, "Cleared all notifications");
        self.commit(&[Collection::Notifications])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
