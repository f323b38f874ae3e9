//! Item: a tracked inventory unit with a quantity and a classification.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HomeStockError, ValidationError};
use crate::id::{HomeId, ItemId, ItemTypeId, LocationId};
use crate::view::LowStockThreshold;

/// Longest accepted item name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Quantity given to items built without an explicit one.
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// UTC time of an item's creation or last change.
pub type Timestamp = DateTime<Utc>;

fn now() -> Timestamp {
    Utc::now()
}

/// A single inventory record.
///
/// `type_id` is required when creating an item, but snapshots received from
/// the API are tolerated without one: the view engine groups such items
/// under "Unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub home_id: HomeId,
    #[serde(default)]
    pub type_id: Option<ItemTypeId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub location_id: Option<LocationId>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default, rename = "quantity_unit")]
    pub unit: Option<String>,
    #[serde(default = "now")]
    pub created_at: Timestamp,
    #[serde(default = "now")]
    pub updated_at: Timestamp,
}

impl Item {
    /// Create a builder for constructing an [`Item`].
    #[must_use]
    pub fn builder() -> ItemBuilder {
        ItemBuilder::default()
    }

    /// Check the item form rules.
    ///
    /// # Errors
    ///
    /// Returns [`HomeStockError::Validation`] when the name is empty or longer
    /// than [`MAX_NAME_LEN`], the type is missing, or the quantity is negative
    /// or not a finite number.
    pub fn validate(&self) -> Result<(), HomeStockError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let len = self.name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong {
                max: MAX_NAME_LEN,
                actual: len,
            }
            .into());
        }
        if self.type_id.is_none() {
            return Err(ValidationError::MissingItemType.into());
        }
        validate_quantity(self.quantity)?;
        Ok(())
    }

    /// Whether the item counts as low stock for the given threshold.
    #[must_use]
    pub fn is_low_stock(&self, threshold: LowStockThreshold) -> bool {
        self.quantity <= threshold.value()
    }

    /// Mark the item as changed now.
    pub fn touch(&mut self) {
        self.updated_at = now();
    }

    /// Replace the quantity and bump `updated_at`.
    pub fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
        self.touch();
    }
}

fn validate_quantity(quantity: f64) -> Result<(), ValidationError> {
    if !quantity.is_finite() {
        return Err(ValidationError::InvalidQuantity);
    }
    if quantity < 0.0 {
        return Err(ValidationError::NegativeQuantity);
    }
    Ok(())
}

/// Step-by-step builder for [`Item`].
#[derive(Debug, Default)]
pub struct ItemBuilder {
    id: Option<ItemId>,
    home_id: Option<HomeId>,
    type_id: Option<ItemTypeId>,
    name: Option<String>,
    description: Option<String>,
    barcode: Option<String>,
    notes: Option<String>,
    location_id: Option<LocationId>,
    quantity: Option<f64>,
    unit: Option<String>,
}

impl ItemBuilder {
    #[must_use]
    pub fn id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn home_id(mut self, home_id: HomeId) -> Self {
        self.home_id = Some(home_id);
        self
    }

    #[must_use]
    pub fn type_id(mut self, type_id: ItemTypeId) -> Self {
        self.type_id = Some(type_id);
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
    pub fn barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn location_id(mut self, location_id: LocationId) -> Self {
        self.location_id = Some(location_id);
        self
    }

    #[must_use]
    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Consume the builder, validate, and return an [`Item`].
    ///
    /// # Errors
    ///
    /// Returns [`HomeStockError::Validation`] if the item breaks the form
    /// rules (see [`Item::validate`]).
    pub fn build(self) -> Result<Item, HomeStockError> {
        let created_at = now();
        let item = Item {
            id: self.id.unwrap_or_default(),
            home_id: self.home_id.unwrap_or_default(),
            type_id: self.type_id,
            name: self.name.unwrap_or_default(),
            description: self.description,
            barcode: self.barcode,
            notes: self.notes,
            location_id: self.location_id,
            quantity: self.quantity.unwrap_or(DEFAULT_QUANTITY),
            unit: self.unit,
            created_at,
            updated_at: created_at,
        };
        item.validate()?;
        Ok(item)
    }
}

/// Why a quantity was changed by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjustmentReason {
    StockCount,
    Damage,
    Sale,
    Purchase,
    Other,
}

impl AdjustmentReason {
    /// All reasons, in the order a picker lists them.
    pub const ALL: [Self; 5] = [
        Self::StockCount,
        Self::Damage,
        Self::Sale,
        Self::Purchase,
        Self::Other,
    ];

    /// Wire value (`"stock-count"`, `"damage"`, …).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StockCount => "stock-count",
            Self::Damage => "damage",
            Self::Sale => "sale",
            Self::Purchase => "purchase",
            Self::Other => "other",
        }
    }

}

impl fmt::Display for AdjustmentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdjustmentReason {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::MissingReason);
        }
        Self::ALL
            .into_iter()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownReason(s.to_string()))
    }
}

/// A manual quantity change, as submitted from the adjustment dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityAdjustment {
    pub new_quantity: f64,
    pub reason: AdjustmentReason,
    #[serde(default)]
    pub notes: Option<String>,
}

impl QuantityAdjustment {
    /// Build a validated adjustment from raw form input.
    ///
    /// # Errors
    ///
    /// Returns [`HomeStockError::Validation`] when the quantity is negative or
    /// not finite, or the reason is empty or unknown.
    pub fn new(
        new_quantity: f64,
        reason: &str,
        notes: Option<String>,
    ) -> Result<Self, HomeStockError> {
        let adjustment = Self {
            new_quantity,
            reason: reason.parse()?,
            notes: notes.filter(|n| !n.trim().is_empty()),
        };
        adjustment.validate()?;
        Ok(adjustment)
    }

    /// Check the adjustment rules.
    ///
    /// # Errors
    ///
    /// Returns [`HomeStockError::Validation`] when the quantity is negative or
    /// not finite.
    pub fn validate(&self) -> Result<(), HomeStockError> {
        validate_quantity(self.new_quantity)?;
        Ok(())
    }
}

/// Step a quantity up by one.
#[must_use]
pub fn increment(quantity: f64) -> f64 {
    quantity + 1.0
}

/// Step a quantity down by one, never below zero.
#[must_use]
pub fn decrement(quantity: f64) -> f64 {
    if quantity > 0.0 {
        (quantity - 1.0).max(0.0)
    } else {
        quantity
    }
}
