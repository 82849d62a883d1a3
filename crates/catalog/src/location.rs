use serde::{Deserialize, Serialize};

use stockbook_core::{DomainError, DomainResult, Entity, LocationId};

use crate::product::normalize_description;

/// A storage location record (warehouse, shelf, bin — the system does not care).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    id: LocationId,
    name: String,
    description: Option<String>,
}

impl Location {
    /// Build a location, generating an id when the caller supplies none.
    pub fn new(
        id: Option<LocationId>,
        name: impl Into<String>,
        description: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("location name cannot be empty"));
        }
        Ok(Self {
            id: id.unwrap_or_else(LocationId::generate),
            name,
            description: normalize_description(description),
        })
    }

    /// Overwrite name and description in place (identity untouched).
    pub fn rename(&mut self, name: impl Into<String>, description: Option<String>) -> DomainResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("location name cannot be empty"));
        }
        self.name = name;
        self.description = normalize_description(description);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Entity for Location {
    type Id = LocationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
