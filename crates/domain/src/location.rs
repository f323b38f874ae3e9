//! Location: a place inside a home where items are kept (pantry, garage shelf, …).

use serde::{Deserialize, Serialize};

use crate::error::{HomeStockError, ValidationError};
use crate::id::{HomeId, LocationId};

/// A named place items can be stored in.
///
/// Locations may nest through `parent_id`; nothing in the view engine walks
/// that hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub home_id: HomeId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<LocationId>,
}

impl Location {
    /// Create a builder for constructing a [`Location`].
    #[must_use]
    pub fn builder() -> LocationBuilder {
        LocationBuilder::default()
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

/// Step-by-step builder for [`Location`].
#[derive(Debug, Default)]
pub struct LocationBuilder {
    id: Option<LocationId>,
    home_id: Option<HomeId>,
    name: Option<String>,
    description: Option<String>,
    parent_id: Option<LocationId>,
}

impl LocationBuilder {
    #[must_use]
    pub fn id(mut self, id: LocationId) -> Self {
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
    pub fn parent_id(mut self, parent_id: LocationId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Consume the builder, validate, and return a [`Location`].
    ///
    /// # Errors
    ///
    /// Returns [`HomeStockError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Location, HomeStockError> {
        let location = Location {
            id: self.id.unwrap_or_default(),
            home_id: self.home_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description,
            parent_id: self.parent_id,
        };
        location.validate()?;
        Ok(location)
    }
}
