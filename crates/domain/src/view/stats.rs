//! Aggregate figures shown on the dashboard stat cards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::item::Item;

/// Quantity at or below which an item is reported as low stock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct LowStockThreshold(f64);

impl LowStockThreshold {
    /// Threshold used when none is configured.
    pub const DEFAULT: f64 = 5.0;

    /// Wrap a threshold value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidQuantity`] for `NaN`/infinite values
    /// and [`ValidationError::NegativeQuantity`] below zero.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidQuantity);
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeQuantity);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for LowStockThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<f64> for LowStockThreshold {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LowStockThreshold> for f64 {
    fn from(threshold: LowStockThreshold) -> Self {
        threshold.0
    }
}

/// Figures derived from the full, unfiltered item list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedStats {
    pub total_items: usize,
    pub total_quantity: f64,
    /// Distinct item types referenced by at least one item.
    pub item_types: usize,
    /// Distinct locations referenced by at least one item.
    pub locations: usize,
    pub low_stock_items: usize,
}

/// Compute dashboard statistics over `items`.
///
/// Items without a type or location do not contribute to the distinct
/// counts. An empty slice yields all-zero stats.
#[must_use]
pub fn compute_stats(items: &[Item], threshold: LowStockThreshold) -> DerivedStats {
    let mut type_ids = HashSet::new();
    let mut location_ids = HashSet::new();
    let mut stats = DerivedStats {
        total_items: items.len(),
        ..DerivedStats::default()
    };

    for item in items {
        stats.total_quantity += item.quantity;
        if let Some(type_id) = item.type_id {
            type_ids.insert(type_id);
        }
        if let Some(location_id) = item.location_id {
            location_ids.insert(location_id);
        }
        if item.is_low_stock(threshold) {
            stats.low_stock_items += 1;
        }
    }

    stats.item_types = type_ids.len();
    stats.locations = location_ids.len();
    stats
}
