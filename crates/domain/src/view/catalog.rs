//! Id → display-name lookup over the item-type and location reference lists.

use std::collections::HashMap;

use crate::id::{ItemTypeId, LocationId};
use crate::item_type::ItemType;
use crate::location::Location;

/// Borrowed index over reference data.
///
/// When an id appears twice in a list, the first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct Catalog<'a> {
    item_types: &'a [ItemType],
    type_names: HashMap<ItemTypeId, &'a str>,
    location_names: HashMap<LocationId, &'a str>,
}

impl<'a> Catalog<'a> {
    #[must_use]
    pub fn new(item_types: &'a [ItemType], locations: &'a [Location]) -> Self {
        let mut type_names = HashMap::with_capacity(item_types.len());
        for item_type in item_types {
            type_names
                .entry(item_type.id)
                .or_insert(item_type.name.as_str());
        }

        let mut location_names = HashMap::with_capacity(locations.len());
        for location in locations {
            location_names
                .entry(location.id)
                .or_insert(location.name.as_str());
        }

        Self {
            item_types,
            type_names,
            location_names,
        }
    }

    /// Name of the item type, if the id is set and known.
    #[must_use]
    pub fn type_name(&self, id: Option<ItemTypeId>) -> Option<&'a str> {
        id.and_then(|id| self.type_names.get(&id).copied())
    }

    /// Name of the location, if the id is set and known.
    #[must_use]
    pub fn location_name(&self, id: Option<LocationId>) -> Option<&'a str> {
        id.and_then(|id| self.location_names.get(&id).copied())
    }

    #[must_use]
    pub fn item_types(&self) -> &'a [ItemType] {
        self.item_types
    }
}
