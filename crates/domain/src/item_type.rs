//! Item type: the classification an item belongs to (canned food, batteries, …).

use serde::{Deserialize, Serialize};

use crate::error::{HomeStockError, ValidationError};
use crate::id::{HomeId, ItemTypeId};

/// Reference data classifying items within a home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    pub id: ItemTypeId,
    pub home_id: HomeId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Unit suggested when creating an item of this type (e.g. `"kg"`).
    #[serde(default)]
    pub default_unit: Option<String>,
}

impl ItemType {
    /// Create a builder for constructing an [`ItemType`].
    #[must_use]
    pub fn builder() -> ItemTypeBuilder {
        ItemTypeBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomeStockError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), HomeStockError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`ItemType`].
#[derive(Debug, Default)]
pub struct ItemTypeBuilder {
    id: Option<ItemTypeId>,
    home_id: Option<HomeId>,
    name: Option<String>,
    description: Option<String>,
    default_unit: Option<String>,
}

impl ItemTypeBuilder {
    #[must_use]
    pub fn id(mut self, id: ItemTypeId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn home_id(mut self, home_id: HomeId) -> Self {
        self.home_id = Some(home_id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn default_unit(mut self, unit: impl Into<String>) -> Self {
        self.default_unit = Some(unit.into());
        self
    }

    /// Consume the builder, validate, and return an [`ItemType`].
    ///
    /// # Errors
    ///
    /// Returns [`HomeStockError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<ItemType, HomeStockError> {
        let item_type = ItemType {
            id: self.id.unwrap_or_default(),
            home_id: self.home_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description,
            default_unit: self.default_unit,
        };
        item_type.validate()?;
        Ok(item_type)
    }
}
