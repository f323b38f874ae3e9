//! Column sorting of the item list.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use crate::item::Item;

/// Column the list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    /// Item-type display name.
    Type,
    /// Location display name.
    Location,
    Quantity,
}

impl SortField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Type => "type",
            Self::Location => "location",
            Self::Quantity => "quantity",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "type" => Ok(Self::Type),
            "location" => Ok(Self::Location),
            "quantity" => Ok(Self::Quantity),
            other => Err(ParseSortError::Field(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(ParseSortError::Direction(other.to_string())),
        }
    }
}

/// Failure to parse a sort field or direction from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseSortError {
    #[error("unknown sort field {0:?}, expected name, type, location or quantity")]
    Field(String),
    #[error("unknown sort direction {0:?}, expected asc or desc")]
    Direction(String),
}

/// Active column and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    #[must_use]
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Column-header click: the active field flips direction, any other
    /// field becomes active in ascending order.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }
}

impl FromStr for SortState {
    type Err = ParseSortError;

    /// Parse `"field"` or `"field:direction"` (e.g. `"quantity:desc"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((field, direction)) => Ok(Self::new(field.parse()?, direction.parse()?)),
            None => Ok(Self::new(s.parse()?, SortDirection::Ascending)),
        }
    }
}

enum SortKey {
    Text(String),
    Quantity(f64),
}

impl SortKey {
    fn of(item: &Item, field: SortField, catalog: &Catalog<'_>) -> Self {
        match field {
            SortField::Name => Self::Text(item.name.to_lowercase()),
            SortField::Type => Self::Text(
                catalog
                    .type_name(item.type_id)
                    .unwrap_or_default()
                    .to_lowercase(),
            ),
            SortField::Location => Self::Text(
                catalog
                    .location_name(item.location_id)
                    .unwrap_or_default()
                    .to_lowercase(),
            ),
            SortField::Quantity => Self::Quantity(item.quantity),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Quantity(a), Self::Quantity(b)) => a.total_cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Order `items` by `sort`, returning a new list of references.
///
/// The sort is stable. Descending order reverses the comparison rather than
/// the result, so items with equal keys keep their input order in both
/// directions. Unresolved type/location names sort as the empty string.
#[must_use]
pub fn sort_items<'a, I>(items: I, sort: SortState, catalog: &Catalog<'_>) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut keyed: Vec<(SortKey, &'a Item)> = items
        .into_iter()
        .map(|item| (SortKey::of(item, sort.field, catalog), item))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match sort.direction {
        SortDirection::Ascending => a.compare(b),
        SortDirection::Descending => b.compare(a),
    });

    keyed.into_iter().map(|(_, item)| item).collect()
}
