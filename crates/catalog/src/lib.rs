//! `stockbook-catalog` — product and storage-location records.
//!
//! Both record kinds share the same lifecycle: created with a caller-chosen
//! or generated identifier, renamed in place, never deleted.

pub mod location;
pub mod product;

pub use location::Location;
pub use product::Product;
