//! `stockbook-store` — the entity store seam.
//!
//! [`InventoryStore`] is the boundary the façade talks to. Two backends:
//! an in-memory store for tests/dev and a durable SQLite store. Both
//! serialize conflicting writes internally; callers get last-committed-wins
//! semantics with no cross-request ordering guarantee.

pub mod in_memory;
pub mod sqlite;
mod store;

pub use in_memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use store::{InventoryStore, StoreError, StoreResult};
