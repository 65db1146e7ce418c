//! Delete integrity checks
//!
//! Decides whether an entity may be removed before the store touches
//! anything. Only accessories can be blocked (live references from cars);
//! the other kinds always delete, with cascades and join cleanup handled
//! by the store. Existence of the target is the handler's concern: a
//! missing id is a 404, not a verdict.

use crate::Result;
use crate::storage::CatalogStore;

/// Verdict for a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteCheck {
    Allowed,
    /// Refused; carries the number of cars still referencing the entity
    Blocked { dependentes: i64 },
}

/// Dependency checks over the catalog store
pub struct DeleteGuard<'a> {
    store: &'a CatalogStore,
}

impl<'a> DeleteGuard<'a> {
    /// Create a new guard
    pub fn new(store: &'a CatalogStore) -> Self {
        Self { store }
    }

    /// An accessory is deletable only while no car references it
    pub fn check_acessorio(&self, id: i64) -> Result<DeleteCheck> {
        let dependentes = self.store.count_carros_with_acessorio(id)?;
        if dependentes > 0 {
            tracing::debug!(id, dependentes, "accessory delete blocked");
            Ok(DeleteCheck::Blocked { dependentes })
        } else {
            Ok(DeleteCheck::Allowed)
        }
    }

    /// Cars always delete; the store clears their join rows first
    pub fn check_carro(&self, _id: i64) -> Result<DeleteCheck> {
        Ok(DeleteCheck::Allowed)
    }

    /// Brands always delete; the store cascades to owned cars and profile
    pub fn check_marca(&self, _id: i64) -> Result<DeleteCheck> {
        Ok(DeleteCheck::Allowed)
    }

    /// Profiles always delete; the owning brand's reference is cleared
    pub fn check_ficha(&self, _id: i64) -> Result<DeleteCheck> {
        Ok(DeleteCheck::Allowed)
    }
}
