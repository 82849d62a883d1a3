use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{DomainError, DomainResult, LocationId, MovementId, ProductId};

/// Movement shape, determined by which endpoints are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Stock arriving from an external source (`to_location` only).
    Inbound,
    /// Stock leaving to an external sink (`from_location` only).
    Outbound,
    /// Stock moving between two locations (both endpoints set).
    Transfer,
}

/// One immutable entry in the append-only movement ledger.
///
/// Endpoint references are plain identifier values; nothing checks that the
/// product or locations exist in the catalog. Timestamps record creation
/// time and are not guaranteed monotonic across entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    id: MovementId,
    timestamp: DateTime<Utc>,
    product_id: ProductId,
    from_location: Option<LocationId>,
    to_location: Option<LocationId>,
    qty: i64,
}

impl Movement {
    /// Record a movement now, with a generated identifier.
    ///
    /// Fails with `Validation` unless `qty > 0`.
    pub fn record(
        product_id: ProductId,
        qty: i64,
        from_location: Option<LocationId>,
        to_location: Option<LocationId>,
    ) -> DomainResult<Self> {
        Self::from_parts(
            MovementId::generate(),
            Utc::now(),
            product_id,
            from_location,
            to_location,
            qty,
        )
    }

    /// Rebuild a movement from stored parts (or build one deterministically
    /// in tests). Same validation as [`Movement::record`].
    pub fn from_parts(
        id: MovementId,
        timestamp: DateTime<Utc>,
        product_id: ProductId,
        from_location: Option<LocationId>,
        to_location: Option<LocationId>,
        qty: i64,
    ) -> DomainResult<Self> {
        if qty <= 0 {
            return Err(DomainError::validation("movement qty must be positive"));
        }
        Ok(Self {
            id,
            timestamp,
            product_id,
            from_location,
            to_location,
            qty,
        })
    }

    pub fn id(&self) -> &MovementId {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn from_location(&self) -> Option<&LocationId> {
        self.from_location.as_ref()
    }

    pub fn to_location(&self) -> Option<&LocationId> {
        self.to_location.as_ref()
    }

    pub fn qty(&self) -> i64 {
        self.qty
    }

    /// Classify the movement; `None` when both endpoints are absent.
    ///
    /// A movement with neither endpoint is constructible and kept as a valid
    /// no-op on balances; no current entry point produces one.
    pub fn kind(&self) -> Option<MovementKind> {
        match (&self.from_location, &self.to_location) {
            (None, Some(_)) => Some(MovementKind::Inbound),
            (Some(_), None) => Some(MovementKind::Outbound),
            (Some(_), Some(_)) => Some(MovementKind::Transfer),
            (None, None) => None,
        }
    }
}
