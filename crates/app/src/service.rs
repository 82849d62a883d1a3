use tracing::info;

use stockbook_catalog::{Location, Product};
use stockbook_core::{Entity, LocationId, ProductId};
use stockbook_ledger::{BalanceTable, Movement};
use stockbook_store::{InventoryStore, StoreResult};

use crate::report::BalanceRow;

/// Display cap for the recent-movements listing; reports always read the
/// full unbounded ledger.
pub const RECENT_MOVEMENTS_CAP: usize = 200;

/// The query façade: every operation is one synchronous unit of work
/// against the store.
pub struct InventoryService<S> {
    store: S,
}

impl<S: InventoryStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a product; a fresh id is generated when `id` is `None`.
    pub fn create_product(
        &self,
        id: Option<ProductId>,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Product> {
        let product = Product::new(id, name, description.map(str::to_string))?;
        let product = self.store.create_product(product)?;
        info!(product_id = %product.id(), name = product.name(), "product created");
        Ok(product)
    }

    pub fn update_product(
        &self,
        id: &ProductId,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Product> {
        let product = self.store.update_product(id, name, description)?;
        info!(product_id = %product.id(), "product updated");
        Ok(product)
    }

    pub fn get_product(&self, id: &ProductId) -> StoreResult<Product> {
        self.store.get_product(id)
    }

    pub fn list_products(&self) -> StoreResult<Vec<Product>> {
        self.store.list_products()
    }

    /// Create a location; a fresh id is generated when `id` is `None`.
    pub fn create_location(
        &self,
        id: Option<LocationId>,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Location> {
        let location = Location::new(id, name, description.map(str::to_string))?;
        let location = self.store.create_location(location)?;
        info!(location_id = %location.id(), name = location.name(), "location created");
        Ok(location)
    }

    pub fn update_location(
        &self,
        id: &LocationId,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Location> {
        let location = self.store.update_location(id, name, description)?;
        info!(location_id = %location.id(), "location updated");
        Ok(location)
    }

    pub fn get_location(&self, id: &LocationId) -> StoreResult<Location> {
        self.store.get_location(id)
    }

    pub fn list_locations(&self) -> StoreResult<Vec<Location>> {
        self.store.list_locations()
    }

    /// Append a movement to the ledger. Catalog references are not checked;
    /// `qty` must be positive.
    pub fn record_movement(
        &self,
        product_id: ProductId,
        qty: i64,
        from_location: Option<LocationId>,
        to_location: Option<LocationId>,
    ) -> StoreResult<Movement> {
        let movement = Movement::record(product_id, qty, from_location, to_location)?;
        let movement = self.store.append_movement(movement)?;
        info!(
            movement_id = %movement.id(),
            product_id = %movement.product_id(),
            qty = movement.qty(),
            "movement recorded"
        );
        Ok(movement)
    }

    /// Latest movements for display, capped at [`RECENT_MOVEMENTS_CAP`].
    pub fn recent_movements(&self) -> StoreResult<Vec<Movement>> {
        self.store.list_movements(Some(RECENT_MOVEMENTS_CAP))
    }

    /// Derive the balance report from the full ledger.
    ///
    /// Folds every movement into a [`BalanceTable`], joins ids against
    /// catalog names, and keeps non-zero rows only. Pairs referencing ids
    /// the catalog never declared are computed but have no name to show, so
    /// they do not appear in the named report. Rows come out ordered by
    /// product name, then location name (store listing order).
    pub fn balance_report(&self) -> StoreResult<Vec<BalanceRow>> {
        let products = self.store.list_products()?;
        let locations = self.store.list_locations()?;
        let movements = self.store.list_movements(None)?;

        let table = BalanceTable::compute(
            products.iter().map(Entity::id),
            locations.iter().map(Entity::id),
            movements.iter(),
        );

        let mut rows = Vec::new();
        for product in &products {
            for location in &locations {
                let qty = table.get(product.id(), location.id());
                if qty != 0 {
                    rows.push(BalanceRow {
                        product_name: product.name().to_string(),
                        location_name: location.name().to_string(),
                        qty,
                    });
                }
            }
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockbook_core::DomainError;
    use stockbook_store::InMemoryStore;

    fn service() -> InventoryService<InMemoryStore> {
        InventoryService::new(InMemoryStore::new())
    }

    fn pid(s: &str) -> ProductId {
        ProductId::new(s)
    }

    fn lid(s: &str) -> LocationId {
        LocationId::new(s)
    }

    #[test]
    fn report_scenario_inbound_then_outbound() {
        let svc = service();
        svc.create_product(Some(pid("P-A")), "Product A", None).unwrap();
        svc.create_location(Some(lid("L-X")), "Location X", None).unwrap();

        svc.record_movement(pid("P-A"), 5, None, Some(lid("L-X"))).unwrap();
        svc.record_movement(pid("P-A"), 2, Some(lid("L-X")), None).unwrap();

        let rows = svc.balance_report().unwrap();
        assert_eq!(
            rows,
            vec![BalanceRow {
                product_name: "Product A".to_string(),
                location_name: "Location X".to_string(),
                qty: 3,
            }]
        );
    }

    #[test]
    fn report_scenario_transfer() {
        let svc = service();
        svc.create_product(Some(pid("P-A")), "Product A", None).unwrap();
        svc.create_location(Some(lid("L-X")), "Location X", None).unwrap();
        svc.create_location(Some(lid("L-Y")), "Location Y", None).unwrap();

        svc.record_movement(pid("P-A"), 5, Some(lid("L-X")), Some(lid("L-Y"))).unwrap();

        let rows = svc.balance_report().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.contains(&BalanceRow {
            product_name: "Product A".to_string(),
            location_name: "Location X".to_string(),
            qty: -5,
        }));
        assert!(rows.contains(&BalanceRow {
            product_name: "Product A".to_string(),
            location_name: "Location Y".to_string(),
            qty: 5,
        }));
    }

    #[test]
    fn report_empty_without_movements() {
        let svc = service();
        for i in 0..4 {
            svc.create_product(None, &format!("Product {i}"), None).unwrap();
            svc.create_location(None, &format!("Location {i}"), None).unwrap();
        }
        assert!(svc.balance_report().unwrap().is_empty());
    }

    #[test]
    fn report_rows_ordered_by_product_then_location_name() {
        let svc = service();
        svc.create_product(Some(pid("P-B")), "Bolt", None).unwrap();
        svc.create_product(Some(pid("P-A")), "Anvil", None).unwrap();
        svc.create_location(Some(lid("L-Y")), "Yard", None).unwrap();
        svc.create_location(Some(lid("L-X")), "Dock", None).unwrap();

        for p in ["P-A", "P-B"] {
            for l in ["L-X", "L-Y"] {
                svc.record_movement(pid(p), 1, None, Some(lid(l))).unwrap();
            }
        }

        let rows = svc.balance_report().unwrap();
        let order: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.product_name.as_str(), r.location_name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![("Anvil", "Dock"), ("Anvil", "Yard"), ("Bolt", "Dock"), ("Bolt", "Yard")]
        );
    }

    #[test]
    fn report_is_idempotent_between_movements() {
        let svc = service();
        svc.create_product(Some(pid("P-A")), "Product A", None).unwrap();
        svc.create_location(Some(lid("L-X")), "Location X", None).unwrap();
        svc.record_movement(pid("P-A"), 5, None, Some(lid("L-X"))).unwrap();

        assert_eq!(svc.balance_report().unwrap(), svc.balance_report().unwrap());
    }

    #[test]
    fn movement_against_unknown_ids_is_recorded_but_unnamed() {
        let svc = service();
        svc.record_movement(pid("ghost"), 3, None, Some(lid("nowhere"))).unwrap();

        // ledger keeps it, report has no name to join
        assert_eq!(svc.recent_movements().unwrap().len(), 1);
        assert!(svc.balance_report().unwrap().is_empty());
    }

    #[test]
    fn record_movement_rejects_non_positive_qty() {
        let svc = service();
        let err = svc
            .record_movement(pid("P-A"), 0, None, Some(lid("L-X")))
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::Validation(_))));
        assert!(svc.recent_movements().unwrap().is_empty());
    }

    #[test]
    fn qty_one_is_accepted_and_visible() {
        let svc = service();
        svc.create_product(Some(pid("P-A")), "Product A", None).unwrap();
        svc.create_location(Some(lid("L-X")), "Location X", None).unwrap();
        svc.record_movement(pid("P-A"), 1, None, Some(lid("L-X"))).unwrap();

        let rows = svc.balance_report().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].qty, 1);
    }

    #[test]
    fn duplicate_create_rejected_update_overwrites() {
        let svc = service();
        svc.create_product(Some(pid("P-A")), "Product A", None).unwrap();

        let err = svc.create_product(Some(pid("P-A")), "Other", None).unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::Conflict(_))));

        let updated = svc.update_product(&pid("P-A"), "Renamed", None).unwrap();
        assert_eq!(updated.name(), "Renamed");
    }
}
