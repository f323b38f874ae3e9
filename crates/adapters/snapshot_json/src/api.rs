//! Snapshot-backed implementation of [`InventoryApi`].

use std::future::Future;
use std::sync::Arc;

use homestock_app::ports::InventoryApi;
use homestock_app::session::Session;
use homestock_domain::error::{HomeStockError, NotFoundError};
use homestock_domain::home::Home;
use homestock_domain::id::{HomeId, ItemId};
use homestock_domain::item::Item;
use homestock_domain::item_type::ItemType;
use homestock_domain::location::Location;

use crate::store::{SnapshotFile, SnapshotStore, write_back};

/// Inventory API answering from a [`SnapshotStore`].
///
/// Mutations are written back to the snapshot file, if the store has one,
/// before they become visible in memory. Concurrent mutations are applied
/// one at a time.
#[derive(Clone)]
pub struct JsonInventoryApi {
    store: Arc<SnapshotStore>,
}

impl JsonInventoryApi {
    #[must_use]
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }

    fn authorize(data: &SnapshotFile, session: &Session) -> Result<(), HomeStockError> {
        match data.api_key.as_deref() {
            Some(key) if session.token() != Some(key) => Err(HomeStockError::Unauthorized),
            _ => Ok(()),
        }
    }

    /// Run a read under the lock after checking credentials.
    fn read<T>(
        &self,
        session: &Session,
        f: impl FnOnce(&SnapshotFile) -> T,
    ) -> Result<T, HomeStockError> {
        let data = self.store.lock();
        Self::authorize(&data, session)?;
        Ok(f(&*data))
    }

    /// Apply a mutation to a copy of the snapshot, persist it, then publish
    /// it. Nothing happens until the returned future is polled.
    fn mutate<T, F>(
        &self,
        session: &Session,
        f: F,
    ) -> impl Future<Output = Result<T, HomeStockError>> + Send
    where
        T: Send,
        F: FnOnce(&mut SnapshotFile) -> Result<T, HomeStockError> + Send,
    {
        let session = session.clone();
        async move {
            let _writer = self.store.writer().await;
            let (value, next, pending) = {
                let data = self.store.lock();
                Self::authorize(&data, &session)?;
                let mut next = data.clone();
                let value = f(&mut next)?;
                let pending = self.store.pending_write(&next)?;
                (value, next, pending)
            };
            write_back(pending).await?;
            self.store.replace(next);
            Ok(value)
        }
    }
}

fn not_found(id: ItemId) -> HomeStockError {
    NotFoundError {
        entity: "Item",
        id: id.to_string(),
    }
    .into()
}

fn position(data: &SnapshotFile, id: ItemId) -> Result<usize, HomeStockError> {
    data.items
        .iter()
        .position(|item| item.id == id)
        .ok_or_else(|| not_found(id))
}

impl InventoryApi for JsonInventoryApi {
    fn list_homes(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<Vec<Home>, HomeStockError>> + Send {
        let result = self.read(session, |data| data.homes.clone());
        async { result }
    }

    fn list_items(
        &self,
        session: &Session,
        home_id: HomeId,
    ) -> impl Future<Output = Result<Vec<Item>, HomeStockError>> + Send {
        let result = self.read(session, |data| {
            data.items
                .iter()
                .filter(|item| item.home_id == home_id)
                .cloned()
                .collect()
        });
        async { result }
    }

    fn get_item(
        &self,
        session: &Session,
        id: ItemId,
    ) -> impl Future<Output = Result<Option<Item>, HomeStockError>> + Send {
        let result = self.read(session, |data| {
            data.items.iter().find(|item| item.id == id).cloned()
        });
        async { result }
    }

    fn create_item(
        &self,
        session: &Session,
        item: Item,
    ) -> impl Future<Output = Result<Item, HomeStockError>> + Send {
        self.mutate(session, move |data| {
            data.items.push(item.clone());
            Ok(item)
        })
    }

    fn update_item(
        &self,
        session: &Session,
        item: Item,
    ) -> impl Future<Output = Result<Item, HomeStockError>> + Send {
        self.mutate(session, move |data| {
            let index = position(data, item.id)?;
            data.items[index] = item.clone();
            Ok(item)
        })
    }

    fn update_item_quantity(
        &self,
        session: &Session,
        id: ItemId,
        quantity: f64,
    ) -> impl Future<Output = Result<Item, HomeStockError>> + Send {
        self.mutate(session, move |data| {
            let index = position(data, id)?;
            let item = &mut data.items[index];
            item.set_quantity(quantity);
            Ok(item.clone())
        })
    }

    fn delete_item(
        &self,
        session: &Session,
        id: ItemId,
    ) -> impl Future<Output = Result<(), HomeStockError>> + Send {
        self.mutate(session, move |data| {
            let index = position(data, id)?;
            data.items.remove(index);
            Ok(())
        })
    }

    fn list_item_types(
        &self,
        session: &Session,
        home_id: HomeId,
    ) -> impl Future<Output = Result<Vec<ItemType>, HomeStockError>> + Send {
        let result = self.read(session, |data| {
            data.item_types
                .iter()
                .filter(|item_type| item_type.home_id == home_id)
                .cloned()
                .collect()
        });
        async { result }
    }

    fn list_locations(
        &self,
        session: &Session,
        home_id: HomeId,
    ) -> impl Future<Output = Result<Vec<Location>, HomeStockError>> + Send {
        let result = self.read(session, |data| {
            data.locations
                .iter()
                .filter(|location| location.home_id == home_id)
                .cloned()
                .collect()
        });
        async { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Config;
    use homestock_domain::id::{ItemTypeId, UserId};

    fn home() -> Home {
        Home {
            id: HomeId::new(),
            name: "Flat".to_string(),
            owner_id: UserId::new(),
        }
    }

    fn item(home_id: HomeId, name: &str) -> Item {
        Item::builder()
            .home_id(home_id)
            .type_id(ItemTypeId::new())
            .name(name)
            .quantity(4.0)
            .build()
            .unwrap()
    }

    fn api_with(data: SnapshotFile) -> JsonInventoryApi {
        JsonInventoryApi::new(Arc::new(SnapshotStore::in_memory(data)))
    }

    #[tokio::test]
    async fn should_list_only_items_of_requested_home() {
        let flat = home();
        let cabin = home();
        let api = api_with(SnapshotFile {
            homes: vec![flat.clone(), cabin.clone()],
            items: vec![item(flat.id, "Rice"), item(cabin.id, "Logs")],
            ..SnapshotFile::default()
        });

        let items = api
            .list_items(&Session::anonymous(), flat.id)
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Rice");
    }

    #[tokio::test]
    async fn should_reject_wrong_token_when_api_key_set() {
        let api = api_with(SnapshotFile {
            api_key: Some("secret".to_string()),
            ..SnapshotFile::default()
        });

        let denied = api.list_homes(&Session::with_token("guess")).await;
        assert!(matches!(denied, Err(HomeStockError::Unauthorized)));

        let anonymous = api.list_homes(&Session::anonymous()).await;
        assert!(matches!(anonymous, Err(HomeStockError::Unauthorized)));

        let allowed = api.list_homes(&Session::with_token("secret")).await;
        assert!(allowed.is_ok());
    }

    #[tokio::test]
    async fn should_update_quantity_in_place() {
        let flat = home();
        let rice = item(flat.id, "Rice");
        let api = api_with(SnapshotFile {
            items: vec![rice.clone()],
            ..SnapshotFile::default()
        });

        let updated = api
            .update_item_quantity(&Session::anonymous(), rice.id, 1.5)
            .await
            .unwrap();
        assert!((updated.quantity - 1.5).abs() < f64::EPSILON);

        let fetched = api
            .get_item(&Session::anonymous(), rice.id)
            .await
            .unwrap()
            .unwrap();
        assert!((fetched.quantity - 1.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_item() {
        let api = api_with(SnapshotFile::default());
        let result = api
            .update_item(&Session::anonymous(), item(HomeId::new(), "Ghost"))
            .await;
        assert!(matches!(result, Err(HomeStockError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_item() {
        let flat = home();
        let rice = item(flat.id, "Rice");
        let api = api_with(SnapshotFile {
            items: vec![rice.clone()],
            ..SnapshotFile::default()
        });

        api.delete_item(&Session::anonymous(), rice.id).await.unwrap();
        let fetched = api.get_item(&Session::anonymous(), rice.id).await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn should_write_mutations_back_to_file() {
        let path = std::env::temp_dir().join(format!("homestock-api-{}.json", uuid::Uuid::new_v4()));
        let store = Config { path: path.clone() }.build().await.unwrap();
        let api = JsonInventoryApi::new(Arc::new(store));
        let flat = home();

        api.create_item(&Session::anonymous(), item(flat.id, "Pasta"))
            .await
            .unwrap();

        let reloaded = Config { path: path.clone() }.build().await.unwrap();
        assert_eq!(reloaded.lock().items.len(), 1);
        assert_eq!(reloaded.lock().items[0].name, "Pasta");

        tokio::fs::remove_file(path).await.unwrap();
    }

    fn temp_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("homestock-api-{}.json", uuid::Uuid::new_v4()))
    }

    async fn file_item_names(path: &std::path::Path) -> Vec<String> {
        let reloaded = Config {
            path: path.to_path_buf(),
        }
        .build()
        .await
        .unwrap();
        reloaded.lock().items.iter().map(|i| i.name.clone()).collect()
    }

    #[tokio::test]
    async fn should_keep_both_writes_when_awaited_out_of_order() {
        let path = temp_path();
        let store = Config { path: path.clone() }.build().await.unwrap();
        let api = JsonInventoryApi::new(Arc::new(store));
        let flat = home();
        let session = Session::anonymous();

        let first = api.create_item(&session, item(flat.id, "Apples"));
        let second = api.create_item(&session, item(flat.id, "Bananas"));
        second.await.unwrap();
        first.await.unwrap();

        let mut names = file_item_names(&path).await;
        names.sort();
        assert_eq!(names, vec!["Apples", "Bananas"]);
        assert_eq!(api.store.lock().items.len(), 2);

        tokio::fs::remove_file(path).await.unwrap();
    }

    #[tokio::test]
    async fn should_keep_both_writes_when_joined() {
        let path = temp_path();
        let store = Config { path: path.clone() }.build().await.unwrap();
        let api = JsonInventoryApi::new(Arc::new(store));
        let flat = home();
        let session = Session::anonymous();

        let (a, b) = tokio::join!(
            api.create_item(&session, item(flat.id, "Apples")),
            api.create_item(&session, item(flat.id, "Bananas")),
        );
        a.unwrap();
        b.unwrap();

        assert_eq!(file_item_names(&path).await.len(), 2);

        tokio::fs::remove_file(path).await.unwrap();
    }

    #[tokio::test]
    async fn should_leave_state_untouched_when_mutation_is_dropped() {
        let path = temp_path();
        let store = Config { path: path.clone() }.build().await.unwrap();
        let api = JsonInventoryApi::new(Arc::new(store));
        let flat = home();

        api.create_item(&Session::anonymous(), item(flat.id, "Apples"))
            .await
            .unwrap();
        drop(api.create_item(&Session::anonymous(), item(flat.id, "Cherries")));

        let in_memory: Vec<String> = api.store.lock().items.iter().map(|i| i.name.clone()).collect();
        assert_eq!(in_memory, vec!["Apples"]);
        assert_eq!(file_item_names(&path).await, vec!["Apples"]);

        tokio::fs::remove_file(path).await.unwrap();
    }

    #[tokio::test]
    async fn should_not_change_memory_when_write_back_fails() {
        let path = std::env::temp_dir()
            .join(format!("homestock-missing-{}", uuid::Uuid::new_v4()))
            .join("snapshot.json");
        let store = Config { path }.build().await.unwrap();
        let api = JsonInventoryApi::new(Arc::new(store));
        let pasta = item(HomeId::new(), "Pasta");

        let result = api.create_item(&Session::anonymous(), pasta.clone()).await;
        assert!(matches!(result, Err(HomeStockError::Storage(_))));

        let fetched = api.get_item(&Session::anonymous(), pasta.id).await.unwrap();
        assert!(fetched.is_none());
    }
}
