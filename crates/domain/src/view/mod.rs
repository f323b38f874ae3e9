//! Inventory view engine.
//!
//! Pure, synchronous derivations over a snapshot of items plus the item-type
//! and location reference lists:
//!
//! - [`compute_stats`]: dashboard figures over the unfiltered list
//! - [`filter_items`]: search term and type filter
//! - [`sort_items`]: stable column sort
//! - [`charts`]: distributions, top quantities, low stock
//!
//! None of these mutate their input; calling them twice with the same input
//! yields the same output.

pub mod catalog;
pub mod charts;
pub mod filter;
pub mod sort;
pub mod stats;

use serde::{Deserialize, Serialize};

use crate::item::Item;
use crate::item_type::ItemType;
use crate::location::Location;

pub use catalog::Catalog;
pub use charts::{InventoryCharts, type_filter_options};
pub use filter::{FilterState, filter_items};
pub use sort::{SortDirection, SortField, SortState, sort_items};
pub use stats::{DerivedStats, LowStockThreshold, compute_stats};

/// Everything the view engine reads for one home.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySnapshot {
    pub items: Vec<Item>,
    pub item_types: Vec<ItemType>,
    pub locations: Vec<Location>,
}

impl InventorySnapshot {
    /// Lookup over this snapshot's reference lists.
    #[must_use]
    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(&self.item_types, &self.locations)
    }

    /// Filter then sort the items.
    #[must_use]
    pub fn view(&self, filter: &FilterState, sort: SortState) -> Vec<&Item> {
        sort_items(filter_items(&self.items, filter), sort, &self.catalog())
    }
}
