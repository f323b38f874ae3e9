//! Item list view-model: presentation state for the inventory table.
//!
//! Holds the search/type filter and the sort column, applies the
//! header-click toggle rule, and renders a snapshot into table rows. The
//! view engine itself stays stateless; this struct is the only place the
//! user's choices live.

use serde::Serialize;

use homestock_domain::id::{ItemId, ItemTypeId};
use homestock_domain::item::Item;
use homestock_domain::view::catalog::Catalog;
use homestock_domain::view::charts::{TypeFilterOption, UNKNOWN_LABEL};
use homestock_domain::view::{
    DerivedStats, FilterState, InventorySnapshot, LowStockThreshold, SortDirection, SortField,
    SortState, compute_stats, filter_items, sort_items, type_filter_options,
};

/// Location cell text for items stored nowhere in particular.
pub const NO_LOCATION_LABEL: &str = "Not specified";

/// Why the table has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// Items exist but none pass the filter; offer "reset filters".
    NoMatches,
    /// The home has no items at all; offer "add first item".
    EmptyInventory,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRow {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub type_name: String,
    pub location_name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub low_stock: bool,
}

impl ItemRow {
    fn new(item: &Item, catalog: &Catalog<'_>, threshold: LowStockThreshold) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            type_name: catalog
                .type_name(item.type_id)
                .unwrap_or(UNKNOWN_LABEL)
                .to_string(),
            location_name: catalog
                .location_name(item.location_id)
                .unwrap_or(NO_LOCATION_LABEL)
                .to_string(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            low_stock: item.is_low_stock(threshold),
        }
    }
}

/// Everything the inventory page draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemListPage {
    /// Over the unfiltered list.
    pub stats: DerivedStats,
    pub rows: Vec<ItemRow>,
    /// Rows shown after filtering.
    pub shown: usize,
    /// Items in the unfiltered list.
    pub total: usize,
    pub empty_state: Option<EmptyState>,
    pub type_options: Vec<TypeFilterOption>,
    pub selected_types: usize,
    pub sort: SortState,
}

/// Presentation state of the item list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemListView {
    filter: FilterState,
    sort: SortState,
}

impl ItemListView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state(filter: FilterState, sort: SortState) -> Self {
        Self { filter, sort }
    }

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
    }

    pub fn clear_search(&mut self) {
        self.filter.search.clear();
    }

    /// Tick or untick a type in the type picker.
    pub fn set_type_selected(&mut self, type_id: ItemTypeId, checked: bool) {
        if checked {
            self.filter.type_ids.insert(type_id);
        } else {
            self.filter.type_ids.remove(&type_id);
        }
    }

    /// Drop the search term and every selected type.
    pub fn reset_filters(&mut self) {
        self.filter = FilterState::default();
    }

    /// Column-header click.
    pub fn sort_by(&mut self, field: SortField) {
        self.sort.toggle(field);
    }

    /// Arrow to draw next to a column header, if it is the active one.
    #[must_use]
    pub fn sort_indicator(&self, field: SortField) -> Option<SortDirection> {
        (self.sort.field == field).then_some(self.sort.direction)
    }

    /// Render `snapshot` with the current filter and sort.
    #[must_use]
    pub fn render(&self, snapshot: &InventorySnapshot, threshold: LowStockThreshold) -> ItemListPage {
        let catalog = snapshot.catalog();
        let filtered = filter_items(&snapshot.items, &self.filter);
        let shown = filtered.len();
        let rows: Vec<ItemRow> = sort_items(filtered, self.sort, &catalog)
            .into_iter()
            .map(|item| ItemRow::new(item, &catalog, threshold))
            .collect();

        let total = snapshot.items.len();
        let empty_state = match (total, shown) {
            (0, _) => Some(EmptyState::EmptyInventory),
            (_, 0) => Some(EmptyState::NoMatches),
            _ => None,
        };

        ItemListPage {
            stats: compute_stats(&snapshot.items, threshold),
            rows,
            shown,
            total,
            empty_state,
            type_options: type_filter_options(&snapshot.items, &catalog),
            selected_types: self.filter.type_ids.len(),
            sort: self.sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestock_domain::item_type::ItemType;
    use homestock_domain::location::Location;

    fn snapshot() -> InventorySnapshot {
        let dairy = ItemType::builder().name("Dairy").build().unwrap();
        let bakery = ItemType::builder().name("Bakery").build().unwrap();
        let fridge = Location::builder().name("Fridge").build().unwrap();

        let milk = Item::builder()
            .name("Milk")
            .description("Semi-skimmed")
            .type_id(dairy.id)
            .location_id(fridge.id)
            .quantity(2.0)
            .unit("l")
            .build()
            .unwrap();
        let eggs = Item::builder()
            .name("Eggs")
            .type_id(dairy.id)
            .location_id(fridge.id)
            .quantity(12.0)
            .build()
            .unwrap();
        let bread = Item::builder()
            .name("Bread")
            .type_id(bakery.id)
            .quantity(2.0)
            .build()
            .unwrap();

        InventorySnapshot {
            items: vec![milk, eggs, bread],
            item_types: vec![dairy, bakery],
            locations: vec![fridge],
        }
    }

    fn row_names(page: &ItemListPage) -> Vec<&str> {
        page.rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn should_render_all_items_sorted_by_name_by_default() {
        let page = ItemListView::new().render(&snapshot(), LowStockThreshold::default());

        assert_eq!(row_names(&page), vec!["Bread", "Eggs", "Milk"]);
        assert_eq!(page.shown, 3);
        assert_eq!(page.total, 3);
        assert!(page.empty_state.is_none());
    }

    #[test]
    fn should_fill_row_labels() {
        let page = ItemListView::new().render(&snapshot(), LowStockThreshold::default());
        let bread = &page.rows[0];
        let milk = &page.rows[2];

        assert_eq!(bread.type_name, "Bakery");
        assert_eq!(bread.location_name, NO_LOCATION_LABEL);
        assert!(bread.low_stock);
        assert_eq!(milk.location_name, "Fridge");
        assert_eq!(milk.unit.as_deref(), Some("l"));
        assert!(!page.rows[1].low_stock);
    }

    #[test]
    fn should_label_unknown_type() {
        let mut snapshot = snapshot();
        snapshot.items[0].type_id = None;
        let page = ItemListView::new().render(&snapshot, LowStockThreshold::default());
        let milk = page.rows.iter().find(|r| r.name == "Milk").unwrap();
        assert_eq!(milk.type_name, "Unknown");
    }

    #[test]
    fn should_compute_stats_over_unfiltered_list() {
        let mut view = ItemListView::new();
        view.set_search("milk");
        let page = view.render(&snapshot(), LowStockThreshold::default());

        assert_eq!(row_names(&page), vec!["Milk"]);
        assert_eq!(page.stats.total_items, 3);
        assert_eq!(page.shown, 1);
    }

    #[test]
    fn should_filter_by_selected_types() {
        let snapshot = snapshot();
        let dairy = snapshot.item_types[0].id;
        let mut view = ItemListView::new();
        view.set_type_selected(dairy, true);

        let page = view.render(&snapshot, LowStockThreshold::default());
        assert_eq!(row_names(&page), vec!["Eggs", "Milk"]);
        assert_eq!(page.selected_types, 1);

        view.set_type_selected(dairy, false);
        let page = view.render(&snapshot, LowStockThreshold::default());
        assert_eq!(page.shown, 3);
    }

    #[test]
    fn should_toggle_sort_on_header_clicks() {
        let mut view = ItemListView::new();
        view.sort_by(SortField::Quantity);
        let page = view.render(&snapshot(), LowStockThreshold::default());
        assert_eq!(row_names(&page), vec!["Milk", "Bread", "Eggs"]);
        assert_eq!(view.sort_indicator(SortField::Quantity), Some(SortDirection::Ascending));
        assert_eq!(view.sort_indicator(SortField::Name), None);

        view.sort_by(SortField::Quantity);
        let page = view.render(&snapshot(), LowStockThreshold::default());
        assert_eq!(row_names(&page), vec!["Eggs", "Milk", "Bread"]);
    }

    #[test]
    fn should_report_no_matches_and_reset() {
        let mut view = ItemListView::new();
        view.set_search("caviar");
        let page = view.render(&snapshot(), LowStockThreshold::default());
        assert_eq!(page.empty_state, Some(EmptyState::NoMatches));
        assert!(page.rows.is_empty());

        view.reset_filters();
        assert!(!view.filter().is_active());
        let page = view.render(&snapshot(), LowStockThreshold::default());
        assert!(page.empty_state.is_none());
    }

    #[test]
    fn should_report_empty_inventory() {
        let page =
            ItemListView::new().render(&InventorySnapshot::default(), LowStockThreshold::default());
        assert_eq!(page.empty_state, Some(EmptyState::EmptyInventory));
        assert_eq!(page.stats, DerivedStats::default());
    }

    #[test]
    fn should_clear_search_only() {
        let snapshot = snapshot();
        let mut view = ItemListView::new();
        view.set_search("milk");
        view.set_type_selected(snapshot.item_types[0].id, true);
        view.clear_search();

        assert!(view.filter().search.is_empty());
        assert_eq!(view.filter().type_ids.len(), 1);
    }

    #[test]
    fn should_list_type_options_with_counts() {
        let page = ItemListView::new().render(&snapshot(), LowStockThreshold::default());
        let options: Vec<(&str, usize)> = page
            .type_options
            .iter()
            .map(|o| (o.name.as_str(), o.count))
            .collect();
        assert_eq!(options, vec![("Dairy", 2), ("Bakery", 1)]);
    }

    #[test]
    fn should_serialize_empty_state_in_snake_case() {
        let json = serde_json::to_string(&EmptyState::NoMatches).unwrap();
        assert_eq!(json, "\"no_matches\"");
    }
}
