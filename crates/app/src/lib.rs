//! `stockbook-app` — the query façade.
//!
//! [`InventoryService`] is the seam a presentation layer talks to: validated
//! mutations against the entity store, the derived balance report, and
//! seeded sample-data generation. The service holds no state of its own;
//! every report reflects the latest committed movements.

pub mod report;
pub mod seed;
pub mod service;
pub mod telemetry;

pub use report::BalanceRow;
pub use service::InventoryService;
