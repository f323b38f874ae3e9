//! Remote inventory API port: the request/response contract of the backend.

use std::future::Future;

use homestock_domain::error::HomeStockError;
use homestock_domain::home::Home;
use homestock_domain::id::{HomeId, ItemId};
use homestock_domain::item::Item;
use homestock_domain::item_type::ItemType;
use homestock_domain::location::Location;

use crate::session::Session;

/// Client for the household inventory backend.
///
/// Every call carries the caller's [`Session`]. Implementations report a
/// rejected or missing token as [`HomeStockError::Unauthorized`]; services
/// react by clearing the session.
pub trait InventoryApi {
    /// Homes the session's user belongs to.
    fn list_homes(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<Vec<Home>, HomeStockError>> + Send;

    /// All items of a home.
    fn list_items(
        &self,
        session: &Session,
        home_id: HomeId,
    ) -> impl Future<Output = Result<Vec<Item>, HomeStockError>> + Send;

    /// A single item, or `None` when it does not exist.
    fn get_item(
        &self,
        session: &Session,
        id: ItemId,
    ) -> impl Future<Output = Result<Option<Item>, HomeStockError>> + Send;

    /// Create an item; returns the stored record.
    fn create_item(
        &self,
        session: &Session,
        item: Item,
    ) -> impl Future<Output = Result<Item, HomeStockError>> + Send;

    /// Replace an existing item; returns the stored record.
    fn update_item(
        &self,
        session: &Session,
        item: Item,
    ) -> impl Future<Output = Result<Item, HomeStockError>> + Send;

    /// Set only the quantity of an item; returns the stored record.
    fn update_item_quantity(
        &self,
        session: &Session,
        id: ItemId,
        quantity: f64,
    ) -> impl Future<Output = Result<Item, HomeStockError>> + Send;

    /// Delete an item.
    fn delete_item(
        &self,
        session: &Session,
        id: ItemId,
    ) -> impl Future<Output = Result<(), HomeStockError>> + Send;

    /// Item-type reference list of a home.
    fn list_item_types(
        &self,
        session: &Session,
        home_id: HomeId,
    ) -> impl Future<Output = Result<Vec<ItemType>, HomeStockError>> + Send;

    /// Location reference list of a home.
    fn list_locations(
        &self,
        session: &Session,
        home_id: HomeId,
    ) -> impl Future<Output = Result<Vec<Location>, HomeStockError>> + Send;
}
