//! Balance report rows: the plain data handed to the presentation layer.

use serde::{Deserialize, Serialize};

/// One non-zero balance, joined against catalog names for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub product_name: String,
    pub location_name: String,
    pub qty: i64,
}
