//! # Supplier Operations
//!
//! CRUD for the Supplier collection. A supplier's `order_history` is
//! append-only and maintained by the order module, never patched
//! directly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use relay_core::{validation, Supplier, SupplierPatch};

use crate::error::{StoreError, StoreResult};

use super::{Collection, InventoryStore};

/// Input for creating a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    pub name: String,
    pub contact_person: String,
}

impl InventoryStore {
    /// Creates a supplier and snapshots the collection.
    pub fn add_supplier(&mut self, new: NewSupplier) -> StoreResult<Supplier> {
        validation::validate_name("name", &new.name)?;
        validation::validate_name("contact person", &new.contact_person)?;

        let now = self.now();
        let supplier = Supplier {
            id: self.next_id(),
            name: new.name.trim().to_string(),
            contact_person: new.contact_person.trim().to_string(),
            order_history: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        debug!(id = %supplier.id, name = %supplier.name, "Adding supplier");

        self.suppliers.push(supplier.clone());
        self.commit(&[Collection::Suppliers])?;

        Ok(supplier)
    }

    /// Merges a partial update into an existing supplier.
    pub fn update_supplier(&mut self, id: &str, patch: SupplierPatch) -> StoreResult<Supplier> {
        if let Some(name) = &patch.name {
            validation::validate_name("name", name)?;
        }
        if let Some(contact) = &patch.contact_person {
            validation::validate_name("contact person", contact)?;
        }

        let now = self.now();
        let supplier = self
            .suppliers
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("Supplier", id))?;

        if let Some(name) = patch.name {
            supplier.name = name.trim().to_string();
        }
        if let Some(contact) = patch.contact_person {
            supplier.contact_person = contact.trim().to_string();
        }
        supplier.updated_at = now;

        let updated = supplier.clone();
        debug!(id = %id, "Updated supplier");

        self.commit(&[Collection::Suppliers])?;
        Ok(updated)
    }

    /// Deletes a supplier. Orders already placed keep their supplier id
    /// the same way ledger entries keep deleted product ids.
    pub fn delete_supplier(&mut self, id: &str) -> StoreResult<()> {
        let before = self.suppliers.len();
        self.suppliers.retain(|s| s.id != id);

        if self.suppliers.len() == before {
            return Err(StoreError::not_found("Supplier", id));
        }

        debug!(id = %id, "Deleted supplier");
        self.commit(&[Collection::Suppliers])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
