//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HomeStockError`] via `From` (no `String` variants).

/// Base error shared by the application layer and adapters.
#[derive(Debug, thiserror::Error)]
pub enum HomeStockError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The remote API rejected the session credentials.
    #[error("unauthorized, please log in again")]
    Unauthorized,

    /// An adapter-level failure (IO, decoding, transport).
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required name is missing or empty.
    #[error("name is required")]
    EmptyName,

    /// A name exceeds the maximum length.
    #[error("name must be less than {max} characters, got {actual}")]
    NameTooLong {
        /// Maximum accepted number of characters.
        max: usize,
        /// Actual number of characters.
        actual: usize,
    },

    /// An item was submitted without an item type.
    #[error("item type is required")]
    MissingItemType,

    /// A quantity is below zero.
    #[error("quantity cannot be negative")]
    NegativeQuantity,

    /// A quantity is `NaN` or infinite.
    #[error("quantity must be a number")]
    InvalidQuantity,

    /// A quantity adjustment was submitted without a reason.
    #[error("reason is required")]
    MissingReason,

    /// The adjustment reason is not one of the known values.
    #[error("unknown adjustment reason {0:?}")]
    UnknownReason(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (e.g. `"Item"`).
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}
