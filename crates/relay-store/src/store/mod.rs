//! # Inventory Store
//!
//! The single owner of all inventory state.
//!
//! ## Mutation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Inventory Store Pipeline                       │
//! │                                                                     │
//! │  caller ──► mutation (add_product / add_transaction / …)            │
//! │                 │                                                   │
//! │                 ├── validate input          (ValidationError)       │
//! │                 ├── resolve references      (NotFound)              │
//! │                 ├── check conflicts         (InsufficientStock)     │
//! │                 │                                                   │
//! │                 ▼  commit new collection state in memory            │
//! │            post-commit hook (synchronous, no hidden scheduler)      │
//! │                 │                                                   │
//! │                 ├── re-derive low-stock alerts (product commits)    │
//! │                 └── snapshot every touched collection               │
//! │                                                                     │
//! │  A snapshot failure surfaces as StoreError::Snapshot; the           │
//! │  in-memory state stays authoritative and a retried save is safe.    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Globals
//! The store is an explicit instance constructed once at process start
//! and injected into every collaborator. Nothing in this crate reaches
//! for ambient state.
//!
//! ## Concurrency Model
//! Single logical writer: every mutation takes `&mut self` and runs to
//! completion (including its snapshot writes) before the next one.
//! [`StoreState`] provides the Arc/Mutex wrapper collaborator layers
//! use to serialize access.

mod alerts;
mod ledger;
mod order;
mod product;
mod supplier;

pub use ledger::LedgerEntry;
pub use order::NewOrder;
pub use product::NewProduct;
pub use supplier::NewSupplier;

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use relay_core::{
    Notification, Order, Product, StockTransaction, Supplier, UNKNOWN_PRODUCT_NAME,
};

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::ids::{IdSource, UuidSource};
use crate::snapshot::{self, keys, BlobStore, SnapshotError};

// =============================================================================
// Collections
// =============================================================================

/// The five collections the store owns, used to name what a commit
/// touched so the hook snapshots exactly those.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Products,
    Suppliers,
    Transactions,
    Notifications,
    Orders,
}

impl Collection {
    /// Blob key this collection snapshots under.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Products => keys::PRODUCTS,
            Collection::Suppliers => keys::SUPPLIERS,
            Collection::Transactions => keys::TRANSACTIONS,
            Collection::Notifications => keys::NOTIFICATIONS,
            Collection::Orders => keys::ORDERS,
        }
    }
}

// =============================================================================
// Inventory Store
// =============================================================================

/// Owner of the five entity collections and their snapshot lifecycle.
pub struct InventoryStore {
    config: StoreConfig,
    blobs: Box<dyn BlobStore>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,

    products: Vec<Product>,
    suppliers: Vec<Supplier>,
    /// Append-only ledger, newest first.
    transactions: Vec<StockTransaction>,
    notifications: Vec<Notification>,
    orders: Vec<Order>,
}

impl InventoryStore {
    /// Opens a store over `blobs`, hydrating every collection before
    /// any read is served. Absent keys hydrate empty; malformed or
    /// wrong-version snapshots refuse to load.
    pub fn open(config: StoreConfig, blobs: Box<dyn BlobStore>) -> StoreResult<Self> {
        Self::open_with(config, blobs, Box::new(SystemClock), Box::new(UuidSource))
    }

    /// [`open`](Self::open) with explicit clock and id seams.
    pub fn open_with(
        config: StoreConfig,
        blobs: Box<dyn BlobStore>,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdSource>,
    ) -> StoreResult<Self> {
        let products = snapshot::load_collection(blobs.as_ref(), keys::PRODUCTS)?;
        let suppliers = snapshot::load_collection(blobs.as_ref(), keys::SUPPLIERS)?;
        let transactions = snapshot::load_collection(blobs.as_ref(), keys::TRANSACTIONS)?;
        let notifications = snapshot::load_collection(blobs.as_ref(), keys::NOTIFICATIONS)?;
        let orders = snapshot::load_collection(blobs.as_ref(), keys::ORDERS)?;

        info!(
            products = products.len(),
            suppliers = suppliers.len(),
            transactions = transactions.len(),
            notifications = notifications.len(),
            orders = orders.len(),
            "Inventory store hydrated"
        );

        Ok(InventoryStore {
            config,
            blobs,
            clock,
            ids,
            products,
            suppliers,
            transactions,
            notifications,
            orders,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    pub fn list_suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    /// The ledger, newest first.
    pub fn list_transactions(&self) -> &[StockTransaction] {
        &self.transactions
    }

    pub fn list_notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn list_orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn get_supplier(&self, id: &str) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    pub fn get_order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Products at or below their reorder point.
    pub fn get_low_stock_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_low_stock()).collect()
    }

    /// Non-Delivered orders whose expected date has passed, evaluated
    /// against the injected clock. Overdue is a query, never a flag.
    pub fn get_overdue_orders(&self) -> Vec<&Order> {
        let now = self.clock.now();
        self.orders.iter().filter(|o| o.is_overdue(now)).collect()
    }

    /// Resolves a product id to a display name for history rendering.
    ///
    /// Transactions survive product deletion, so a dangling reference
    /// resolves to "Unknown product" instead of failing the lookup.
    pub fn product_display_name(&self, product_id: &str) -> &str {
        self.get_product(product_id)
            .map(|p| p.name.as_str())
            .unwrap_or(UNKNOWN_PRODUCT_NAME)
    }

    // =========================================================================
    // Internals shared by the mutation modules
    // =========================================================================

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub(crate) fn next_id(&self) -> String {
        self.ids.next_id()
    }

    /// Post-commit hook: runs synchronously after every successful
    /// in-memory mutation.
    ///
    /// 1. If the Product collection changed, re-derive low-stock
    ///    alerts (which may add to the Notification collection).
    /// 2. Snapshot every touched collection, whole-value.
    ///
    /// Notification-only commits (mark-read, clear-all) do not
    /// re-derive; otherwise clear-all would instantly resurrect alerts
    /// for still-low products, contradicting its contract.
    pub(crate) fn commit(&mut self, touched: &[Collection]) -> StoreResult<()> {
        let mut touched = touched.to_vec();

        if touched.contains(&Collection::Products) {
            let created = self.derive_low_stock_alerts();
            if created > 0 && !touched.contains(&Collection::Notifications) {
                touched.push(Collection::Notifications);
            }
        }

        for collection in &touched {
            if let Err(err) = self.save(*collection) {
                warn!(key = collection.key(), error = %err, "Snapshot save failed; in-memory state remains authoritative");
                return Err(err.into());
            }
        }

        Ok(())
    }

    fn save(&self, collection: Collection) -> Result<(), SnapshotError> {
        let blobs = self.blobs.as_ref();
        match collection {
            Collection::Products => {
                snapshot::save_collection(blobs, keys::PRODUCTS, &self.products)
            }
            Collection::Suppliers => {
                snapshot::save_collection(blobs, keys::SUPPLIERS, &self.suppliers)
            }
            Collection::Transactions => {
                snapshot::save_collection(blobs, keys::TRANSACTIONS, &self.transactions)
            }
            Collection::Notifications => {
                snapshot::save_collection(blobs, keys::NOTIFICATIONS, &self.notifications)
            }
            Collection::Orders => snapshot::save_collection(blobs, keys::ORDERS, &self.orders),
        }
    }
}

// =============================================================================
// Shared Store Handle
// =============================================================================

/// Mutex-guarded store handle for collaborator layers.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<…>>` because:
/// - `Arc`: shared ownership across collaborator tasks
/// - `Mutex`: exactly one mutation in flight, per the single-writer model
///
/// ## Why Not RwLock?
/// Mutations dominate and also write snapshots while holding the lock;
/// a RwLock would add complexity with minimal benefit.
pub struct StoreState {
    inner: Arc<Mutex<InventoryStore>>,
}

impl StoreState {
    pub fn new(store: InventoryStore) -> Self {
        StoreState {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InventoryStore) -> R,
    {
        let store = self.inner.lock().expect("store mutex poisoned");
        f(&store)
    }

    /// Executes a function with write access to the store.
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InventoryStore) -> R,
    {
        let mut store = self.inner.lock().expect("store mutex poisoned");
        f(&mut store)
    }
}

impl Clone for StoreState {
    fn clone(&self) -> Self {
        StoreState {
            inner: Arc::clone(&self.inner),
        }
    }
}

// =============================================================================
// Test Kit
// =============================================================================

#[cfg(test)]
pub(crate) mod testkit {
    use std::io;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::snapshot::MemoryBlobStore;

    /// Settable clock shared between a test and its store.
    #[derive(Clone)]
    pub(crate) struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

    impl ManualClock {
        pub(crate) fn fixed() -> Self {
            let t = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
            ManualClock(Arc::new(Mutex::new(t)))
        }

        pub(crate) fn set(&self, t: DateTime<Utc>) {
            *self.0.lock().unwrap() = t;
        }

        pub(crate) fn advance_days(&self, days: i64) {
            let mut now = self.0.lock().unwrap();
            *now += chrono::Duration::days(days);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    /// Sequential ids: "id-0001", "id-0002", …
    #[derive(Clone, Default)]
    pub(crate) struct SeqIds(Arc<AtomicU64>);

    impl IdSource for SeqIds {
        fn next_id(&self) -> String {
            format!("id-{:04}", self.0.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    /// Blob store whose writes always fail, for save-failure paths.
    pub(crate) struct FailingBlobStore;

    impl BlobStore for FailingBlobStore {
        fn get(&self, _key: &str) -> Result<Option<String>, SnapshotError> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), SnapshotError> {
            Err(SnapshotError::Io {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::Other, "disk unplugged"),
            })
        }
    }

    /// Fresh store over an in-memory blob store with pinned seams.
    pub(crate) fn memory_store() -> InventoryStore {
        store_with(ManualClock::fixed(), SeqIds::default())
    }

    pub(crate) fn store_with(clock: ManualClock, ids: SeqIds) -> InventoryStore {
        InventoryStore::open_with(
            StoreConfig::default(),
            Box::new(MemoryBlobStore::new()),
            Box::new(clock),
            Box::new(ids),
        )
        .expect("empty memory store always hydrates")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
