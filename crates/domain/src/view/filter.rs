//! Search-term and item-type filtering of the item list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::id::ItemTypeId;
use crate::item::Item;

/// What the user typed in the search box and ticked in the type picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Matched case-insensitively against name and description.
    pub search: String,
    /// Empty means "all types".
    pub type_ids: HashSet<ItemTypeId>,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_type(mut self, type_id: ItemTypeId) -> Self {
        self.type_ids.insert(type_id);
        self
    }

    /// Whether any predicate is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.type_ids.is_empty()
    }

    /// Whether a single item passes both predicates.
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        Matcher::new(self).matches(item)
    }
}

struct Matcher<'f> {
    needle: String,
    type_ids: &'f HashSet<ItemTypeId>,
}

impl<'f> Matcher<'f> {
    fn new(filter: &'f FilterState) -> Self {
        Self {
            needle: filter.search.to_lowercase(),
            type_ids: &filter.type_ids,
        }
    }

    fn matches(&self, item: &Item) -> bool {
        self.matches_search(item) && self.matches_type(item)
    }

    fn matches_search(&self, item: &Item) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        item.name.to_lowercase().contains(&self.needle)
            || item
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&self.needle))
    }

    fn matches_type(&self, item: &Item) -> bool {
        if self.type_ids.is_empty() {
            return true;
        }
        item.type_id
            .is_some_and(|type_id| self.type_ids.contains(&type_id))
    }
}

/// Items passing `filter`, in input order. The source slice is untouched.
#[must_use]
pub fn filter_items<'a>(items: &'a [Item], filter: &FilterState) -> Vec<&'a Item> {
    let matcher = Matcher::new(filter);
    items.iter().filter(|item| matcher.matches(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, description: Option<&str>, type_id: Option<ItemTypeId>) -> Item {
        let mut item = Item::builder()
            .name(name)
            .type_id(ItemTypeId::new())
            .build()
            .unwrap();
        item.description = description.map(str::to_string);
        item.type_id = type_id;
        item
    }

    fn names<'a>(items: &[&'a Item]) -> Vec<&'a str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn should_return_everything_without_filter() {
        let items = vec![
            item("Milk", None, None),
            item("Eggs", None, Some(ItemTypeId::new())),
        ];
        let filtered = filter_items(&items, &FilterState::new());
        assert_eq!(filtered.len(), items.len());
        assert!(filtered.iter().zip(&items).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn should_match_name_case_insensitively() {
        let items = vec![
            item("Milk", None, None),
            item("Eggs", None, None),
            item("Bread", None, None),
        ];
        let filtered = filter_items(&items, &FilterState::new().with_search("milk"));
        assert_eq!(names(&filtered), vec!["Milk"]);
    }

    #[test]
    fn should_match_description() {
        let items = vec![
            item("Jar", Some("Homemade STRAWBERRY jam"), None),
            item("Tin", Some("Tomatoes"), None),
            item("Box", None, None),
        ];
        let filtered = filter_items(&items, &FilterState::new().with_search("Strawberry"));
        assert_eq!(names(&filtered), vec!["Jar"]);
    }

    #[test]
    fn should_restrict_to_selected_types() {
        let dairy = ItemTypeId::new();
        let bakery = ItemTypeId::new();
        let items = vec![
            item("Milk", None, Some(dairy)),
            item("Bread", None, Some(bakery)),
            item("Cheese", None, Some(dairy)),
            item("Loose", None, None),
        ];
        let filtered = filter_items(&items, &FilterState::new().with_type(dairy));
        assert_eq!(names(&filtered), vec!["Milk", "Cheese"]);
    }

    #[test]
    fn should_require_both_predicates() {
        let dairy = ItemTypeId::new();
        let items = vec![
            item("Milk", None, Some(dairy)),
            item("Milk chocolate", None, Some(ItemTypeId::new())),
        ];
        let filter = FilterState::new().with_search("MILK").with_type(dairy);
        let filtered = filter_items(&items, &filter);
        assert_eq!(names(&filtered), vec!["Milk"]);
    }

    #[test]
    fn should_return_subset_where_every_item_matches() {
        let dairy = ItemTypeId::new();
        let items = vec![
            item("Milk", Some("whole"), Some(dairy)),
            item("Oat milk", None, None),
            item("Eggs", Some("free range"), Some(dairy)),
            item("Cream", Some("for milkshakes"), Some(dairy)),
        ];
        let filter = FilterState::new().with_search("milk").with_type(dairy);
        let filtered = filter_items(&items, &filter);

        assert_eq!(names(&filtered), vec!["Milk", "Cream"]);
        assert!(filtered.iter().all(|i| filter.matches(i)));
        assert!(filtered.iter().all(|f| items.iter().any(|i| std::ptr::eq(*f, i))));
    }

    #[test]
    fn should_report_activity() {
        assert!(!FilterState::new().is_active());
        assert!(FilterState::new().with_search("x").is_active());
        assert!(FilterState::new().with_type(ItemTypeId::new()).is_active());
    }
}
