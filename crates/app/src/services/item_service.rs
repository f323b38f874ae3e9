//! Item service: write-side use-cases for inventory items.

use std::sync::Arc;

use homestock_domain::error::{HomeStockError, NotFoundError};
use homestock_domain::id::{HomeId, ItemId};
use homestock_domain::item::{Item, QuantityAdjustment};

use crate::ports::{InventoryApi, TokenStore};
use crate::session::SessionContext;

/// Application service for item CRUD and quantity adjustments.
pub struct ItemService<A, S> {
    api: A,
    session: Arc<SessionContext<S>>,
}

impl<A: InventoryApi, S: TokenStore> ItemService<A, S> {
    /// Create a new service backed by the given API client and session.
    pub fn new(api: A, session: Arc<SessionContext<S>>) -> Self {
        Self { api, session }
    }

    /// Create a new item after validating the form rules.
    ///
    /// # Errors
    ///
    /// Returns [`HomeStockError::Validation`] if the item is invalid, or an
    /// error propagated from the API client.
    #[tracing::instrument(skip(self, item), fields(item_name = %item.name))]
    pub async fn create_item(&self, item: Item) -> Result<Item, HomeStockError> {
        item.validate()?;
        let session = self.session.session();
        self.session
            .observe(self.api.create_item(&session, item).await)
            .await
    }

    /// Look up an item by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HomeStockError::NotFound`] when no item with `id` exists,
    /// or an error from the API client.
    #[tracing::instrument(skip(self))]
    pub async fn get_item(&self, id: ItemId) -> Result<Item, HomeStockError> {
        let session = self.session.session();
        self.session
            .observe(self.api.get_item(&session, id).await)
            .await?
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Item",
                    id: id.to_string(),
                }
                .into()
            })
    }

    /// List all items of a home.
    ///
    /// # Errors
    ///
    /// Returns an error propagated from the API client.
    pub async fn list_items(&self, home_id: HomeId) -> Result<Vec<Item>, HomeStockError> {
        let session = self.session.session();
        self.session
            .observe(self.api.list_items(&session, home_id).await)
            .await
    }

    /// Replace an existing item after validating the form rules.
    ///
    /// # Errors
    ///
    /// Returns [`HomeStockError::Validation`] if the item is invalid, or an
    /// error from the API client.
    #[tracing::instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn update_item(&self, mut item: Item) -> Result<Item, HomeStockError> {
        item.validate()?;
        item.touch();
        let session = self.session.session();
        self.session
            .observe(self.api.update_item(&session, item).await)
            .await
    }

    /// Set an item's quantity from a manual adjustment.
    ///
    /// # Errors
    ///
    /// Returns [`HomeStockError::Validation`] if the adjustment is invalid,
    /// or an error from the API client.
    #[tracing::instrument(
        skip(self, adjustment),
        fields(reason = %adjustment.reason, new_quantity = adjustment.new_quantity)
    )]
    pub async fn adjust_quantity(
        &self,
        id: ItemId,
        adjustment: QuantityAdjustment,
    ) -> Result<Item, HomeStockError> {
        adjustment.validate()?;
        let session = self.session.session();
        let item = self
            .session
            .observe(
                self.api
                    .update_item_quantity(&session, id, adjustment.new_quantity)
                    .await,
            )
            .await?;
        tracing::info!(notes = ?adjustment.notes, "quantity adjusted");
        Ok(item)
    }

    /// Delete an item by id.
    ///
    /// # Errors
    ///
    /// Returns an error propagated from the API client.
    #[tracing::instrument(skip(self))]
    pub async fn delete_item(&self, id: ItemId) -> Result<(), HomeStockError> {
        let session = self.session.session();
        self.session
            .observe(self.api.delete_item(&session, id).await)
            .await
    }
}
