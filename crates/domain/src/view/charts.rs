//! Chart-ready series for the dashboard: distributions, top quantities, low stock.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use super::catalog::Catalog;
use super::stats::LowStockThreshold;
use crate::id::{ItemId, ItemTypeId, LocationId};
use crate::item::Item;

/// How many items the "top by quantity" series holds.
pub const TOP_QUANTITY_LIMIT: usize = 10;

/// Label for items whose type or location id does not resolve.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Label for items stored nowhere in particular.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// One slice of a pie chart.
///
/// `key` is `None` for the bucket of items without a type (type chart) or
/// without a location (location chart).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionSlice<K> {
    pub key: Option<K>,
    pub name: String,
    pub count: usize,
}

/// One bar of a quantity chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantityPoint {
    pub id: ItemId,
    pub name: String,
    pub value: f64,
    pub unit: Option<String>,
}

impl From<&Item> for QuantityPoint {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            value: item.quantity,
            unit: item.unit.clone(),
        }
    }
}

/// An entry of the type-filter picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeFilterOption {
    pub type_id: ItemTypeId,
    pub name: String,
    /// Items of this type in the unfiltered list.
    pub count: usize,
}

/// Every series the dashboard chart panel draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryCharts {
    pub item_types: Vec<DistributionSlice<ItemTypeId>>,
    pub locations: Vec<DistributionSlice<LocationId>>,
    pub top_quantities: Vec<QuantityPoint>,
    pub low_stock: Vec<QuantityPoint>,
}

impl InventoryCharts {
    #[must_use]
    pub fn compute(items: &[Item], catalog: &Catalog<'_>, threshold: LowStockThreshold) -> Self {
        Self {
            item_types: type_distribution(items, catalog),
            locations: location_distribution(items, catalog),
            top_quantities: top_by_quantity(items, TOP_QUANTITY_LIMIT),
            low_stock: low_stock(items, threshold),
        }
    }
}

/// Counts per key in first-seen order, then ordered by count descending.
fn count_by<K, F>(items: &[Item], key_of: F) -> Vec<(Option<K>, usize)>
where
    K: Copy + Eq + Hash,
    F: Fn(&Item) -> Option<K>,
{
    let mut index: HashMap<Option<K>, usize> = HashMap::new();
    let mut counts: Vec<(Option<K>, usize)> = Vec::new();

    for item in items {
        let key = key_of(item);
        let slot = *index.entry(key).or_insert_with(|| {
            counts.push((key, 0));
            counts.len() - 1
        });
        counts[slot].1 += 1;
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Item count per type, largest first.
#[must_use]
pub fn type_distribution(
    items: &[Item],
    catalog: &Catalog<'_>,
) -> Vec<DistributionSlice<ItemTypeId>> {
    count_by(items, |item| item.type_id)
        .into_iter()
        .map(|(key, count)| DistributionSlice {
            key,
            name: catalog.type_name(key).unwrap_or(UNKNOWN_LABEL).to_string(),
            count,
        })
        .collect()
}

/// Item count per location, largest first.
#[must_use]
pub fn location_distribution(
    items: &[Item],
    catalog: &Catalog<'_>,
) -> Vec<DistributionSlice<LocationId>> {
    count_by(items, |item| item.location_id)
        .into_iter()
        .map(|(key, count)| {
            let name = match key {
                None => UNASSIGNED_LABEL,
                Some(_) => catalog.location_name(key).unwrap_or(UNKNOWN_LABEL),
            };
            DistributionSlice {
                key,
                name: name.to_string(),
                count,
            }
        })
        .collect()
}

/// The `limit` items with the largest quantities, largest first.
#[must_use]
pub fn top_by_quantity(items: &[Item], limit: usize) -> Vec<QuantityPoint> {
    let mut ranked: Vec<&Item> = items.iter().collect();
    ranked.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));
    ranked.into_iter().take(limit).map(QuantityPoint::from).collect()
}

/// Items at or below `threshold`, smallest quantity first.
#[must_use]
pub fn low_stock(items: &[Item], threshold: LowStockThreshold) -> Vec<QuantityPoint> {
    let mut low: Vec<&Item> = items
        .iter()
        .filter(|item| item.is_low_stock(threshold))
        .collect();
    low.sort_by(|a, b| a.quantity.total_cmp(&b.quantity));
    low.into_iter().map(QuantityPoint::from).collect()
}

/// Picker entries for every known type, in reference-list order.
#[must_use]
pub fn type_filter_options(items: &[Item], catalog: &Catalog<'_>) -> Vec<TypeFilterOption> {
    let mut counts: HashMap<ItemTypeId, usize> = HashMap::new();
    for type_id in items.iter().filter_map(|item| item.type_id) {
        *counts.entry(type_id).or_default() += 1;
    }

    catalog
        .item_types()
        .iter()
        .map(|item_type| TypeFilterOption {
            type_id: item_type.id,
            name: item_type.name.clone(),
            count: counts.get(&item_type.id).copied().unwrap_or_default(),
        })
        .collect()
}
