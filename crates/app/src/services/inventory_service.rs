//! Inventory service: loads a home's snapshot and derives the dashboard.

use std::sync::Arc;

use serde::Serialize;

use homestock_domain::error::{HomeStockError, NotFoundError};
use homestock_domain::home::{Home, default_home};
use homestock_domain::id::HomeId;
use homestock_domain::view::{
    DerivedStats, InventoryCharts, InventorySnapshot, LowStockThreshold, compute_stats,
};

use crate::item_list::{ItemListPage, ItemListView};
use crate::ports::{InventoryApi, TokenStore};
use crate::session::SessionContext;

/// Dashboard content for one home.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// `None` when the user has no home yet.
    pub home: Option<Home>,
    pub stats: DerivedStats,
    pub charts: InventoryCharts,
}

/// Dashboard plus the rendered item list, both from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryReport {
    pub dashboard: Dashboard,
    pub items: ItemListPage,
}

/// Read-side use-cases over the remote inventory.
pub struct InventoryService<A, S> {
    api: A,
    session: Arc<SessionContext<S>>,
    threshold: LowStockThreshold,
}

impl<A: InventoryApi, S: TokenStore> InventoryService<A, S> {
    /// Create a new service backed by the given API client and session.
    pub fn new(api: A, session: Arc<SessionContext<S>>, threshold: LowStockThreshold) -> Self {
        Self {
            api,
            session,
            threshold,
        }
    }

    /// List the homes of the current user.
    ///
    /// # Errors
    ///
    /// Returns [`HomeStockError::Unauthorized`] (after clearing the session)
    /// when the token is rejected, or an error from the API client.
    #[tracing::instrument(skip(self))]
    pub async fn list_homes(&self) -> Result<Vec<Home>, HomeStockError> {
        let session = self.session.session();
        self.session.observe(self.api.list_homes(&session).await).await
    }

    /// Resolve the home to display: `home_id` when given, otherwise the
    /// first home of the user.
    ///
    /// # Errors
    ///
    /// Returns [`HomeStockError::NotFound`] when `home_id` is not one of the
    /// user's homes, or an error from [`list_homes`](Self::list_homes).
    #[tracing::instrument(skip(self))]
    pub async fn select_home(&self, home_id: Option<HomeId>) -> Result<Option<Home>, HomeStockError> {
        let homes = self.list_homes().await?;
        match home_id {
            Some(id) => homes
                .into_iter()
                .find(|home| home.id == id)
                .map(Some)
                .ok_or_else(|| {
                    NotFoundError {
                        entity: "Home",
                        id: id.to_string(),
                    }
                    .into()
                }),
            None => Ok(default_home(&homes).cloned()),
        }
    }

    /// Fetch items and both reference lists of a home.
    ///
    /// # Errors
    ///
    /// Returns [`HomeStockError::Unauthorized`] (after clearing the session)
    /// when the token is rejected, or an error from the API client.
    #[tracing::instrument(skip(self))]
    pub async fn snapshot(&self, home_id: HomeId) -> Result<InventorySnapshot, HomeStockError> {
        let session = self.session.session();
        let fetched = tokio::try_join!(
            self.api.list_items(&session, home_id),
            self.api.list_item_types(&session, home_id),
            self.api.list_locations(&session, home_id),
        );
        let (items, item_types, locations) = self.session.observe(fetched).await?;
        tracing::debug!(
            items = items.len(),
            item_types = item_types.len(),
            locations = locations.len(),
            "inventory snapshot loaded"
        );
        Ok(InventorySnapshot {
            items,
            item_types,
            locations,
        })
    }

    /// Build the dashboard from an already-loaded snapshot.
    #[must_use]
    pub fn summarize(&self, home: Option<Home>, snapshot: &InventorySnapshot) -> Dashboard {
        Dashboard {
            home,
            stats: compute_stats(&snapshot.items, self.threshold),
            charts: InventoryCharts::compute(&snapshot.items, &snapshot.catalog(), self.threshold),
        }
    }

    /// Load and summarize the dashboard of a home (see
    /// [`select_home`](Self::select_home)). A user without homes gets an
    /// empty dashboard.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`select_home`](Self::select_home) and
    /// [`snapshot`](Self::snapshot).
    #[tracing::instrument(skip(self))]
    pub async fn dashboard(&self, home_id: Option<HomeId>) -> Result<Dashboard, HomeStockError> {
        let Some(home) = self.select_home(home_id).await? else {
            tracing::info!("no home available, rendering empty dashboard");
            return Ok(self.summarize(None, &InventorySnapshot::default()));
        };
        let snapshot = self.snapshot(home.id).await?;
        Ok(self.summarize(Some(home), &snapshot))
    }

    /// Load a home once and render both its dashboard and its item list
    /// with the state held by `view`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`select_home`](Self::select_home) and
    /// [`snapshot`](Self::snapshot).
    #[tracing::instrument(skip(self, view))]
    pub async fn report(
        &self,
        home_id: Option<HomeId>,
        view: &ItemListView,
    ) -> Result<InventoryReport, HomeStockError> {
        let home = self.select_home(home_id).await?;
        let snapshot = match &home {
            Some(home) => self.snapshot(home.id).await?,
            None => InventorySnapshot::default(),
        };
        let items = view.render(&snapshot, self.threshold);
        tracing::info!(shown = items.shown, total = items.total, "inventory report rendered");
        Ok(InventoryReport {
            dashboard: self.summarize(home, &snapshot),
            items,
        })
    }
}
