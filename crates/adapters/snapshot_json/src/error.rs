//! Snapshot-specific error type wrapping IO and JSON failures.

use homestock_domain::error::HomeStockError;

/// Errors originating from the JSON snapshot layer.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Reading or writing a file failed.
    #[error("snapshot file error")]
    Io(#[from] std::io::Error),

    /// The snapshot file is not valid JSON of the expected shape.
    #[error("snapshot JSON error")]
    Json(#[from] serde_json::Error),
}

impl From<SnapshotError> for HomeStockError {
    fn from(err: SnapshotError) -> Self {
        Self::Storage(Box::new(err))
    }
}
