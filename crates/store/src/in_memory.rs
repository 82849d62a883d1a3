//! In-memory store for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use stockbook_catalog::{Location, Product};
use stockbook_core::{DomainError, Entity, LocationId, ProductId};
use stockbook_ledger::Movement;

use crate::store::{InventoryStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Inner {
    products: HashMap<ProductId, Product>,
    locations: HashMap<LocationId, Location>,
    // append order doubles as the timestamp tie-break
    movements: Vec<Movement>,
}

/// Hash-map backed [`InventoryStore`]; writes serialize on one `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StoreError::storage("store lock poisoned"))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| StoreError::storage("store lock poisoned"))
    }
}

impl InventoryStore for InMemoryStore {
    fn create_product(&self, product: Product) -> StoreResult<Product> {
        let mut inner = self.write()?;
        if inner.products.contains_key(product.id()) {
            return Err(DomainError::conflict(format!("product id {} already exists", product.id())).into());
        }
        inner.products.insert(product.id().clone(), product.clone());
        Ok(product)
    }

    fn update_product(
        &self,
        id: &ProductId,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Product> {
        let mut inner = self.write()?;
        let product = inner.products.get_mut(id).ok_or(DomainError::NotFound)?;
        product.rename(name, description.map(str::to_string))?;
        Ok(product.clone())
    }

    fn get_product(&self, id: &ProductId) -> StoreResult<Product> {
        let inner = self.read()?;
        inner.products.get(id).cloned().ok_or(DomainError::NotFound.into())
    }

    fn list_products(&self) -> StoreResult<Vec<Product>> {
        let inner = self.read()?;
        let mut products: Vec<Product> = inner.products.values().cloned().collect();
        products.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
        Ok(products)
    }

    fn create_location(&self, location: Location) -> StoreResult<Location> {
        let mut inner = self.write()?;
        if inner.locations.contains_key(location.id()) {
            return Err(DomainError::conflict(format!("location id {} already exists", location.id())).into());
        }
        inner.locations.insert(location.id().clone(), location.clone());
        Ok(location)
    }

    fn update_location(
        &self,
        id: &LocationId,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Location> {
        let mut inner = self.write()?;
        let location = inner.locations.get_mut(id).ok_or(DomainError::NotFound)?;
        location.rename(name, description.map(str::to_string))?;
        Ok(location.clone())
    }

    fn get_location(&self, id: &LocationId) -> StoreResult<Location> {
        let inner = self.read()?;
        inner.locations.get(id).cloned().ok_or(DomainError::NotFound.into())
    }

    fn list_locations(&self) -> StoreResult<Vec<Location>> {
        let inner = self.read()?;
        let mut locations: Vec<Location> = inner.locations.values().cloned().collect();
        locations.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
        Ok(locations)
    }

    fn append_movement(&self, movement: Movement) -> StoreResult<Movement> {
        let mut inner = self.write()?;
        inner.movements.push(movement.clone());
        Ok(movement)
    }

    fn list_movements(&self, limit: Option<usize>) -> StoreResult<Vec<Movement>> {
        let inner = self.read()?;
        let mut movements = inner.movements.clone();
        // reverse first so the stable sort leaves timestamp ties
        // most-recent-inserted first
        movements.reverse();
        movements.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        if let Some(limit) = limit {
            movements.truncate(limit);
        }
        Ok(movements)
    }
}
