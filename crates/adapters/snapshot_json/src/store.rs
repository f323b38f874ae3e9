//! Snapshot file loading and write-back.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use homestock_domain::home::Home;
use homestock_domain::item::Item;
use homestock_domain::item_type::ItemType;
use homestock_domain::location::Location;

use crate::error::SnapshotError;

/// On-disk layout of a snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotFile {
    pub homes: Vec<Home>,
    pub item_types: Vec<ItemType>,
    pub locations: Vec<Location>,
    pub items: Vec<Item>,
    /// When set, every call must carry this token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Configuration for the JSON snapshot adapter.
pub struct Config {
    /// Snapshot file path. A missing file starts an empty inventory.
    pub path: PathBuf,
}

impl Config {
    /// Load the snapshot file into a [`SnapshotStore`].
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the file exists but cannot be read or
    /// parsed.
    pub async fn build(self) -> Result<SnapshotStore, SnapshotError> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "snapshot file not found, starting empty");
                SnapshotFile::default()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(SnapshotStore {
            path: Some(self.path),
            data: Mutex::new(data),
            writer: tokio::sync::Mutex::new(()),
        })
    }
}

/// In-memory copy of a snapshot, written back to its file on change.
///
/// Writers take the writer lock for the whole read-modify-write cycle; the
/// in-memory copy is only replaced once the file write succeeded.
pub struct SnapshotStore {
    path: Option<PathBuf>,
    data: Mutex<SnapshotFile>,
    writer: tokio::sync::Mutex<()>,
}

impl SnapshotStore {
    /// A store that never touches the filesystem.
    #[must_use]
    pub fn in_memory(data: SnapshotFile) -> Self {
        Self {
            path: None,
            data: Mutex::new(data),
            writer: tokio::sync::Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lock the snapshot for reading or mutation.
    pub(crate) fn lock(&self) -> MutexGuard<'_, SnapshotFile> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait for exclusive write access.
    pub(crate) async fn writer(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.writer.lock().await
    }

    /// Swap in a new state once it has been persisted.
    pub(crate) fn replace(&self, data: SnapshotFile) {
        *self.lock() = data;
    }

    /// Serialize the current state for a later [`write_back`].
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if serialization fails.
    pub(crate) fn pending_write(
        &self,
        data: &SnapshotFile,
    ) -> Result<Option<(PathBuf, String)>, SnapshotError> {
        match &self.path {
            Some(path) => Ok(Some((path.clone(), serde_json::to_string_pretty(data)?))),
            None => Ok(None),
        }
    }
}

/// Write a serialized snapshot produced by [`SnapshotStore::pending_write`].
///
/// # Errors
///
/// Returns [`SnapshotError::Io`] if the file cannot be written.
pub(crate) async fn write_back(pending: Option<(PathBuf, String)>) -> Result<(), SnapshotError> {
    if let Some((path, json)) = pending {
        tokio::fs::write(&path, json).await?;
        tracing::debug!(path = %path.display(), "snapshot written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("homestock-store-{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn should_start_empty_when_file_is_missing() {
        let store = Config { path: temp_path() }.build().await.unwrap();
        assert_eq!(*store.lock(), SnapshotFile::default());
    }

    #[tokio::test]
    async fn should_load_existing_file() {
        let path = temp_path();
        tokio::fs::write(&path, r#"{"api_key":"k","items":[]}"#)
            .await
            .unwrap();

        let store = Config { path: path.clone() }.build().await.unwrap();
        assert_eq!(store.lock().api_key.as_deref(), Some("k"));
        assert_eq!(store.path(), Some(path.as_path()));

        tokio::fs::remove_file(path).await.unwrap();
    }

    #[tokio::test]
    async fn should_fail_on_malformed_file() {
        let path = temp_path();
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let result = Config { path: path.clone() }.build().await;
        assert!(matches!(result, Err(SnapshotError::Json(_))));

        tokio::fs::remove_file(path).await.unwrap();
    }

    #[tokio::test]
    async fn should_skip_write_back_for_in_memory_store() {
        let store = SnapshotStore::in_memory(SnapshotFile::default());
        let pending = store.pending_write(&store.lock()).unwrap();
        assert!(pending.is_none());
        write_back(pending).await.unwrap();
    }
}
