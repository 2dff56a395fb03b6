//! # Transaction Ledger
//!
//! The stock transaction processor: the only code path that ever
//! changes `Product.stock_level` after creation.
//!
//! ## Atomicity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     add_transaction(p, kind, qty)                   │
//! │                                                                     │
//! │  validate qty > 0 ──── fail ──► ValidationError  (nothing written)  │
//! │       │                                                             │
//! │  resolve product ───── fail ──► NotFound         (nothing written)  │
//! │       │                                                             │
//! │  overdraft check ───── fail ──► InsufficientStock(nothing written)  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  BOTH happen:  prepend ledger entry  +  adjust stock_level          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  post-commit: derive alerts, snapshot transactions + products       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The conservation invariant follows: stock_level always equals the
//! opening balance plus the signed sum of the product's ledger entries.

use serde::{Deserialize, Serialize};
use tracing::info;

use relay_core::{validation, CoreError, Product, StockTransaction, TransactionKind};

use crate::error::{StoreError, StoreResult};

use super::{Collection, InventoryStore};

/// Result of a ledger append: the immutable entry plus the product as
/// it stands after the adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub transaction: StockTransaction,
    pub product: Product,
}

impl InventoryStore {
    /// Appends a stock movement and adjusts the product's level.
    ///
    /// ## Preconditions
    /// - `quantity > 0` (direction comes from `kind`, not sign)
    /// - `product_id` resolves to an existing product
    /// - StockOut must not overdraw unless backorders are enabled
    ///
    /// Either both the ledger append and the stock adjustment happen,
    /// or neither does.
    pub fn add_transaction(
        &mut self,
        product_id: &str,
        kind: TransactionKind,
        quantity: i64,
        reason: &str,
        user_id: &str,
    ) -> StoreResult<LedgerEntry> {
        validation::validate_quantity(quantity)?;
        validation::validate_text("reason", reason)?;
        validation::validate_name("user", user_id)?;

        let now = self.now();
        let id = self.next_id();

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))?;

        if kind == TransactionKind::StockOut
            && !self.config.allow_backorders
            && product.stock_level < quantity
        {
            return Err(StoreError::Core(CoreError::InsufficientStock {
                product: product.name.clone(),
                available: product.stock_level,
                requested: quantity,
            }));
        }

        let transaction = StockTransaction {
            id,
            product_id: product_id.to_string(),
            kind,
            quantity,
            reason: reason.trim().to_string(),
            user_id: user_id.trim().to_string(),
            timestamp: now,
        };

        product.stock_level += kind.signed_delta(quantity);
        product.updated_at = now;
        let product = product.clone();

        // Newest first: the ledger is prepended, never sorted.
        self.transactions.insert(0, transaction.clone());

        info!(
            transaction = %transaction.id,
            product = %product.id,
            kind = ?kind,
            quantity,
            stock_level = product.stock_level,
            "Ledger entry committed"
        );

        self.commit(&[Collection::Transactions, Collection::Products])?;

        Ok(LedgerEntry {
            transaction,
            product,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::super::testkit::*;
    use super::super::NewProduct;
    use super::*;
    use relay_core::{NotificationKind, ValidationError};

    fn seeded_product(store: &mut InventoryStore, stock: i64, reorder: i64) -> String {
        store
            .add_product(NewProduct {
                name: "SFP+ 10G Transceiver".to_string(),
                category: "Optics".to_string(),
                price_cents: 4999,
                stock_level: stock,
                reorder_point: reorder,
            })
            .unwrap()
            .id
    }

    #[test]
    fn test_stock_conservation_over_sequence() {
        let mut store = memory_store();
        let id = seeded_product(&mut store, 100, 5);

        let moves = [
            (TransactionKind::StockOut, 12),
            (TransactionKind::StockIn, 30),
            (TransactionKind::StockOut, 41),
            (TransactionKind::StockOut, 7),
            (TransactionKind::StockIn, 3),
        ];
        let mut expected = 100i64;
        for (kind, qty) in moves {
            store.add_transaction(&id, kind, qty, "cycle count", "u1").unwrap();
            expected += kind.signed_delta(qty);
        }

        let product = store.get_product(&id).unwrap();
        assert_eq!(product.stock_level, expected);

        // Re-derive the same figure from the ledger itself.
        let net: i64 = store
            .list_transactions()
            .iter()
            .filter(|t| t.product_id == id)
            .map(|t| t.kind.signed_delta(t.quantity))
            .sum();
        assert_eq!(product.stock_level, 100 + net);
    }

    #[test]
    fn test_ledger_is_newest_first() {
        let clock = ManualClock::fixed();
        let mut store = store_with(clock.clone(), SeqIds::default());
        let id = seeded_product(&mut store, 50, 5);

        store.add_transaction(&id, TransactionKind::StockOut, 1, "first", "u1").unwrap();
        clock.advance_days(1);
        store.add_transaction(&id, TransactionKind::StockOut, 1, "second", "u1").unwrap();

        let ledger = store.list_transactions();
        assert_eq!(ledger[0].reason, "second");
        assert_eq!(ledger[1].reason, "first");
        assert!(ledger[0].timestamp > ledger[1].timestamp);
    }

    #[test]
    fn test_non_positive_quantity_is_rejected() {
        let mut store = memory_store();
        let id = seeded_product(&mut store, 10, 5);

        for qty in [0, -4] {
            let err = store
                .add_transaction(&id, TransactionKind::StockIn, qty, "restock", "u1")
                .unwrap_err();
            assert!(matches!(
                err,
                StoreError::Core(CoreError::Validation(ValidationError::MustBePositive { .. }))
            ));
        }
        assert!(store.list_transactions().is_empty());
    }

    #[test]
    fn test_unknown_product_leaves_both_collections_untouched() {
        let mut store = memory_store();
        let id = seeded_product(&mut store, 10, 5);

        let err = store
            .add_transaction("ghost", TransactionKind::StockIn, 5, "restock", "u1")
            .unwrap_err();

        assert!(matches!(err, StoreError::Core(CoreError::NotFound { .. })));
        assert!(store.list_transactions().is_empty());
        assert_eq!(store.get_product(&id).unwrap().stock_level, 10);
    }

    #[test]
    fn test_overdraft_conflict_by_default() {
        let mut store = memory_store();
        let id = seeded_product(&mut store, 3, 0);

        let err = store
            .add_transaction(&id, TransactionKind::StockOut, 5, "sale", "u1")
            .unwrap_err();

        match err {
            StoreError::Core(CoreError::InsufficientStock {
                available,
                requested,
                ..
            }) => {
                assert_eq!(available, 3);
                assert_eq!(requested, 5);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
        // Aborted before mutation
        assert_eq!(store.get_product(&id).unwrap().stock_level, 3);
        assert!(store.list_transactions().is_empty());
    }

    #[test]
    fn test_backorder_policy_allows_negative_stock() {
        let mut store = InventoryStore::open_with(
            crate::config::StoreConfig::default().with_backorders(true),
            Box::new(crate::snapshot::MemoryBlobStore::new()),
            Box::new(ManualClock::fixed()),
            Box::new(SeqIds::default()),
        )
        .unwrap();
        let id = seeded_product(&mut store, 3, 0);

        store.add_transaction(&id, TransactionKind::StockOut, 5, "backorder", "u1").unwrap();
        assert_eq!(store.get_product(&id).unwrap().stock_level, -2);
    }

    #[test]
    fn test_exact_drain_is_not_a_conflict() {
        let mut store = memory_store();
        let id = seeded_product(&mut store, 5, 0);

        store.add_transaction(&id, TransactionKind::StockOut, 5, "sale", "u1").unwrap();
        assert_eq!(store.get_product(&id).unwrap().stock_level, 0);
    }

    #[test]
    fn test_stockout_to_low_then_restock_scenario() {
        // p1: stock 10, reorder 5 → StockOut 6 → 4 on hand + one unread
        // LowStock alert naming it. StockIn 20 → 24 on hand, and the
        // alert stays unread: recovery does not retract (by design).
        let mut store = memory_store();
        let id = seeded_product(&mut store, 10, 5);

        let entry = store
            .add_transaction(&id, TransactionKind::StockOut, 6, "sale", "u1")
            .unwrap();
        assert_eq!(entry.product.stock_level, 4);

        let alerts: Vec<_> = store
            .list_notifications()
            .iter()
            .filter(|n| n.is_open_low_stock_for(&id))
            .collect();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, NotificationKind::LowStock);
        assert!(alerts[0].message.contains("SFP+ 10G Transceiver"));

        let entry = store
            .add_transaction(&id, TransactionKind::StockIn, 20, "restock", "u1")
            .unwrap();
        assert_eq!(entry.product.stock_level, 24);

        // The earlier alert remains, still unread.
        let alerts: Vec<_> = store
            .list_notifications()
            .iter()
            .filter(|n| n.is_open_low_stock_for(&id))
            .collect();
        assert_eq!(alerts.len(), 1);
        assert!(!alerts[0].is_read);
    }

    #[test]
    fn test_returned_entry_matches_store_state() {
        let mut store = memory_store();
        let id = seeded_product(&mut store, 10, 2);

        let entry = store
            .add_transaction(&id, TransactionKind::StockOut, 4, "sale", "u1")
            .unwrap();

        assert_eq!(&entry.transaction, &store.list_transactions()[0]);
        assert_eq!(&entry.product, store.get_product(&id).unwrap());
    }
}
