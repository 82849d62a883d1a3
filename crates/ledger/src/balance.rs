//! Balance derivation: a pure fold over the movement ledger.
//!
//! The table seeds every known product × location pair at zero so declared
//! entities appear even without movements, then applies signed deltas per
//! movement. Entries for ids the catalog never declared are admitted
//! dynamically rather than dropped; the report layer decides what to show.

use std::collections::BTreeMap;

use stockbook_core::{LocationId, ProductId};

use crate::movement::Movement;

/// Net signed quantity per (product, location), derived from the ledger.
///
/// The fold is commutative and associative: movement order never affects
/// the result. Stateless and side-effect-free; recomputed from the full
/// ledger on every report request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceTable {
    balances: BTreeMap<(ProductId, LocationId), i64>,
}

impl BalanceTable {
    /// Seed the table with zeros for the cartesian product of known ids.
    pub fn seeded<'a>(
        product_ids: impl IntoIterator<Item = &'a ProductId>,
        location_ids: impl IntoIterator<Item = &'a LocationId>,
    ) -> Self {
        let location_ids: Vec<&LocationId> = location_ids.into_iter().collect();
        let mut balances = BTreeMap::new();
        for p in product_ids {
            for l in &location_ids {
                balances.insert((p.clone(), (*l).clone()), 0);
            }
        }
        Self { balances }
    }

    /// Fold the full ledger into a balance table.
    pub fn compute<'a>(
        product_ids: impl IntoIterator<Item = &'a ProductId>,
        location_ids: impl IntoIterator<Item = &'a LocationId>,
        movements: impl IntoIterator<Item = &'a Movement>,
    ) -> Self {
        let mut table = Self::seeded(product_ids, location_ids);
        for movement in movements {
            table.apply(movement);
        }
        table
    }

    /// Apply one movement: `+qty` at the destination, `-qty` at the source.
    ///
    /// Unknown product/location ids create entries on the fly. A movement
    /// with neither endpoint contributes nothing.
    pub fn apply(&mut self, movement: &Movement) {
        if let Some(to) = movement.to_location() {
            *self
                .balances
                .entry((movement.product_id().clone(), to.clone()))
                .or_insert(0) += movement.qty();
        }
        if let Some(from) = movement.from_location() {
            *self
                .balances
                .entry((movement.product_id().clone(), from.clone()))
                .or_insert(0) -= movement.qty();
        }
    }

    /// Balance for one pair; zero when the pair was never seen.
    pub fn get(&self, product_id: &ProductId, location_id: &LocationId) -> i64 {
        self.balances
            .get(&(product_id.clone(), location_id.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// All computed entries, zero balances included.
    pub fn entries(&self) -> impl Iterator<Item = (&ProductId, &LocationId, i64)> {
        self.balances.iter().map(|((p, l), qty)| (p, l, *qty))
    }

    /// Entries with a non-zero balance (pairs netting to zero are computed
    /// but suppressed from display).
    pub fn non_zero(&self) -> impl Iterator<Item = (&ProductId, &LocationId, i64)> {
        self.entries().filter(|(_, _, qty)| *qty != 0)
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}
