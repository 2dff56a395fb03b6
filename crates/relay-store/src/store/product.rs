//! # Product Operations
//!
//! CRUD for the Product collection.
//!
//! ## Stock Is Off Limits Here
//! `stock_level` is set once at creation and then owned by the ledger
//! (see [`super::ledger`]). [`ProductPatch`] has no stock field, so an
//! update can never break the conservation invariant.

use serde::{Deserialize, Serialize};
use tracing::debug;

use relay_core::{validation, Product, ProductPatch, ProductStatus};

use crate::error::{StoreError, StoreResult};

use super::{Collection, InventoryStore};

/// Input for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    /// Opening balance; subsequent changes go through the ledger.
    pub stock_level: i64,
    pub reorder_point: i64,
}

impl InventoryStore {
    /// Creates a product and snapshots the collection.
    ///
    /// If the opening stock already sits at or below the reorder point,
    /// the post-commit derivation raises a LowStock alert immediately.
    pub fn add_product(&mut self, new: NewProduct) -> StoreResult<Product> {
        validation::validate_name("name", &new.name)?;
        validation::validate_name("category", &new.category)?;
        validation::validate_price_cents(new.price_cents)?;
        validation::validate_initial_stock(new.stock_level)?;
        validation::validate_reorder_point(new.reorder_point)?;

        let now = self.now();
        let product = Product {
            id: self.next_id(),
            name: new.name.trim().to_string(),
            category: new.category.trim().to_string(),
            price_cents: new.price_cents,
            stock_level: new.stock_level,
            reorder_point: new.reorder_point,
            status: ProductStatus::Active,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, name = %product.name, stock = product.stock_level, "Adding product");

        self.products.push(product.clone());
        self.commit(&[Collection::Products])?;

        Ok(product)
    }

    /// Merges a partial update into an existing product.
    ///
    /// Fails with NotFound before any write if `id` is absent.
    pub fn update_product(&mut self, id: &str, patch: ProductPatch) -> StoreResult<Product> {
        if let Some(name) = &patch.name {
            validation::validate_name("name", name)?;
        }
        if let Some(category) = &patch.category {
            validation::validate_name("category", category)?;
        }
        if let Some(price_cents) = patch.price_cents {
            validation::validate_price_cents(price_cents)?;
        }
        if let Some(reorder_point) = patch.reorder_point {
            validation::validate_reorder_point(reorder_point)?;
        }

        let now = self.now();
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        if let Some(name) = patch.name {
            product.name = name.trim().to_string();
        }
        if let Some(category) = patch.category {
            product.category = category.trim().to_string();
        }
        if let Some(price_cents) = patch.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(reorder_point) = patch.reorder_point {
            product.reorder_point = reorder_point;
        }
        if let Some(status) = patch.status {
            product.status = status;
        }
        product.updated_at = now;

        let updated = product.clone();
        debug!(id = %id, "Updated product");

        self.commit(&[Collection::Products])?;
        Ok(updated)
    }

    /// Deletes a product.
    ///
    /// Does NOT cascade into the ledger: transaction history survives
    /// and resolves through [`product_display_name`] from then on.
    ///
    /// [`product_display_name`]: InventoryStore::product_display_name
    pub fn delete_product(&mut self, id: &str) -> StoreResult<()> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);

        if self.products.len() == before {
            return Err(StoreError::not_found("Product", id));
        }

        debug!(id = %id, "Deleted product");
        self.commit(&[Collection::Products])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
