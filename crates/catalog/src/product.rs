use serde::{Deserialize, Serialize};

use stockbook_core::{DomainError, DomainResult, Entity, ProductId};

/// A product record.
///
/// Identity is immutable once created; name and description are mutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: Option<String>,
}

impl Product {
    /// Build a product, generating an id when the caller supplies none.
    ///
    /// Fails with `Validation` when the name is blank. A blank description
    /// is normalized to absent.
    pub fn new(
        id: Option<ProductId>,
        name: impl Into<String>,
        description: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        Ok(Self {
            id: id.unwrap_or_else(ProductId::generate),
            name,
            description: normalize_description(description),
        })
    }

    /// Overwrite name and description in place (identity untouched).
    pub fn rename(&mut self, name: impl Into<String>, description: Option<String>) -> DomainResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
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

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Form layers hand over empty strings for untouched optional fields.
pub(crate) fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}
