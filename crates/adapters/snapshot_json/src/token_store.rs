//! File-backed [`TokenStore`].

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use homestock_app::ports::TokenStore;
use homestock_domain::error::HomeStockError;

use crate::error::SnapshotError;

/// Keeps the session token in a plain text file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> impl Future<Output = Result<Option<String>, HomeStockError>> + Send {
        let path = self.path.clone();
        async move {
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => {
                    let token = content.trim();
                    Ok((!token.is_empty()).then(|| token.to_string()))
                }
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
                Err(err) => Err(SnapshotError::from(err).into()),
            }
        }
    }

    fn save(&self, token: String) -> impl Future<Output = Result<(), HomeStockError>> + Send {
        let path = self.path.clone();
        async move {
            tokio::fs::write(&path, token)
                .await
                .map_err(SnapshotError::from)?;
            tracing::debug!(path = %path.display(), "token saved");
            Ok(())
        }
    }

    fn remove(&self) -> impl Future<Output = Result<(), HomeStockError>> + Send {
        let path = self.path.clone();
        async move {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "token removed");
                    Ok(())
                }
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(err) => Err(SnapshotError::from(err).into()),
            }
        }
    }
}
