use std::sync::Arc;

use thiserror::Error;

use stockbook_catalog::{Location, Product};
use stockbook_core::{DomainError, LocationId, ProductId};
use stockbook_ledger::Movement;

/// Store operation error.
///
/// Domain failures (validation, not-found, duplicate id) pass through
/// transparently; `Storage` covers backend failures, which are fatal to the
/// current request and not retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Domain error carried by this store error, if any.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Storage(_) => None,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable CRUD for products, locations, and the movement ledger.
///
/// Create rejects a duplicate identifier; update overwrites an existing
/// record and fails with `NotFound` otherwise. Movements are append-only
/// and their catalog references are deliberately unchecked.
pub trait InventoryStore: Send + Sync {
    /// Persist a new product. Fails with `Conflict` when the id is taken.
    fn create_product(&self, product: Product) -> StoreResult<Product>;

    /// Overwrite name/description of an existing product.
    fn update_product(
        &self,
        id: &ProductId,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Product>;

    fn get_product(&self, id: &ProductId) -> StoreResult<Product>;

    /// All products, name ascending, identifier as tie-break.
    fn list_products(&self) -> StoreResult<Vec<Product>>;

    /// Persist a new location. Fails with `Conflict` when the id is taken.
    fn create_location(&self, location: Location) -> StoreResult<Location>;

    /// Overwrite name/description of an existing location.
    fn update_location(
        &self,
        id: &LocationId,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Location>;

    fn get_location(&self, id: &LocationId) -> StoreResult<Location>;

    /// All locations, name ascending, identifier as tie-break.
    fn list_locations(&self) -> StoreResult<Vec<Location>>;

    /// Append a movement to the ledger. No existence check on the product
    /// or location references.
    fn append_movement(&self, movement: Movement) -> StoreResult<Movement>;

    /// Movements ordered timestamp descending, ties most-recent-inserted
    /// first. `None` returns the full ledger (report computation).
    fn list_movements(&self, limit: Option<usize>) -> StoreResult<Vec<Movement>>;
}

impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    fn create_product(&self, product: Product) -> StoreResult<Product> {
        (**self).create_product(product)
    }

    fn update_product(
        &self,
        id: &ProductId,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Product> {
        (**self).update_product(id, name, description)
    }

    fn get_product(&self, id: &ProductId) -> StoreResult<Product> {
        (**self).get_product(id)
    }

    fn list_products(&self) -> StoreResult<Vec<Product>> {
        (**self).list_products()
    }

    fn create_location(&self, location: Location) -> StoreResult<Location> {
        (**self).create_location(location)
    }

    fn update_location(
        &self,
        id: &LocationId,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Location> {
        (**self).update_location(id, name, description)
    }

    fn get_location(&self, id: &LocationId) -> StoreResult<Location> {
        (**self).get_location(id)
    }

    fn list_locations(&self) -> StoreResult<Vec<Location>> {
        (**self).list_locations()
    }

    fn append_movement(&self, movement: Movement) -> StoreResult<Movement> {
        (**self).append_movement(movement)
    }

    fn list_movements(&self, limit: Option<usize>) -> StoreResult<Vec<Movement>> {
        (**self).list_movements(limit)
    }
}
