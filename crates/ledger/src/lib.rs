//! `stockbook-ledger` — the movement ledger and balance derivation.
//!
//! Movements form an append-only ledger; balances are never stored, they are
//! derived on demand by folding the full ledger into a [`BalanceTable`].

pub mod balance;
pub mod movement;

pub use balance::BalanceTable;
pub use movement::{Movement, MovementKind};
