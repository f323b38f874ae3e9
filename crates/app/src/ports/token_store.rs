//! Token store port: where the session token survives restarts.

use std::future::Future;

use homestock_domain::error::HomeStockError;

/// Persistence for the bearer token of the current session.
pub trait TokenStore {
    /// The persisted token, if any.
    fn load(&self) -> impl Future<Output = Result<Option<String>, HomeStockError>> + Send;

    /// Persist `token`, replacing any previous one.
    fn save(&self, token: String) -> impl Future<Output = Result<(), HomeStockError>> + Send;

    /// Forget the persisted token. Removing a missing token is not an error.
    fn remove(&self) -> impl Future<Output = Result<(), HomeStockError>> + Send;
}
