//! Session context: the bearer token handed to API-calling ports.
//!
//! The token lives in an explicit [`SessionContext`] owned by the composition
//! root, with an `init` / `set_token` / `clear` lifecycle. Callers take a
//! cheap [`Session`] value out of it for each request.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use homestock_domain::error::HomeStockError;

use crate::ports::TokenStore;

/// Credentials attached to one API call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// A session without credentials.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Value for the `Authorization` header, if authenticated.
    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Owner of the current session and its persisted token.
pub struct SessionContext<S> {
    store: S,
    current: Mutex<Session>,
}

impl<S: TokenStore> SessionContext<S> {
    /// Create an anonymous context backed by `store`. Call
    /// [`init`](Self::init) to restore a persisted token.
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: Mutex::new(Session::anonymous()),
        }
    }

    /// Restore the persisted token, if any. Returns whether the context is
    /// now authenticated.
    ///
    /// # Errors
    ///
    /// Returns an error propagated from the token store.
    #[tracing::instrument(skip(self))]
    pub async fn init(&self) -> Result<bool, HomeStockError> {
        let restored = self.store.load().await?;
        let authenticated = restored.is_some();
        if let Some(token) = restored {
            self.replace(Session::with_token(token));
        }
        tracing::debug!(authenticated, "session initialised");
        Ok(authenticated)
    }

    /// Activate `token` and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error propagated from the token store; the in-memory
    /// session is left unchanged in that case.
    #[tracing::instrument(skip_all)]
    pub async fn set_token(&self, token: impl Into<String>) -> Result<(), HomeStockError> {
        let token = token.into();
        self.store.save(token.clone()).await?;
        self.replace(Session::with_token(token));
        Ok(())
    }

    /// Forget the token both in memory and in the store.
    ///
    /// # Errors
    ///
    /// Returns an error propagated from the token store. The in-memory
    /// session is cleared regardless.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), HomeStockError> {
        self.replace(Session::anonymous());
        self.store.remove().await
    }

    /// Snapshot of the current session for one request.
    #[must_use]
    pub fn session(&self) -> Session {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    /// Pass an API result through, clearing the session when the backend
    /// rejected the credentials.
    ///
    /// # Errors
    ///
    /// Returns `result`'s error unchanged.
    pub async fn observe<T>(
        &self,
        result: Result<T, HomeStockError>,
    ) -> Result<T, HomeStockError> {
        if matches!(result, Err(HomeStockError::Unauthorized)) {
            tracing::warn!("API rejected session credentials, clearing session");
            if let Err(err) = self.clear().await {
                tracing::warn!(error = %err, "failed to remove persisted token");
            }
        }
        result
    }

    fn replace(&self, session: Session) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = session;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;

    #[derive(Default)]
    struct InMemoryTokenStore {
        token: Mutex<Option<String>>,
    }

    impl InMemoryTokenStore {
        fn holding(token: &str) -> Self {
            Self {
                token: Mutex::new(Some(token.to_string())),
            }
        }

        fn stored(&self) -> Option<String> {
            self.token.lock().unwrap().clone()
        }
    }

    impl TokenStore for InMemoryTokenStore {
        fn load(&self) -> impl Future<Output = Result<Option<String>, HomeStockError>> + Send {
            let token = self.token.lock().unwrap().clone();
            async { Ok(token) }
        }

        fn save(&self, token: String) -> impl Future<Output = Result<(), HomeStockError>> + Send {
            *self.token.lock().unwrap() = Some(token);
            async { Ok(()) }
        }

        fn remove(&self) -> impl Future<Output = Result<(), HomeStockError>> + Send {
            *self.token.lock().unwrap() = None;
            async { Ok(()) }
        }
    }

    #[test]
    fn should_format_bearer_header() {
        let session = Session::with_token("abc");
        assert_eq!(session.bearer().as_deref(), Some("Bearer abc"));
        assert!(Session::anonymous().bearer().is_none());
    }

    #[test]
    fn should_redact_token_in_debug_output() {
        let rendered = format!("{:?}", Session::with_token("s3cret"));
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("redacted"));
    }

    #[tokio::test]
    async fn should_start_anonymous_when_store_is_empty() {
        let ctx = SessionContext::new(InMemoryTokenStore::default());
        assert!(!ctx.init().await.unwrap());
        assert!(!ctx.is_authenticated());
    }

    #[tokio::test]
    async fn should_restore_persisted_token_on_init() {
        let ctx = SessionContext::new(InMemoryTokenStore::holding("abc"));
        assert!(!ctx.is_authenticated());

        assert!(ctx.init().await.unwrap());
        assert_eq!(ctx.session().token(), Some("abc"));
    }

    #[tokio::test]
    async fn should_persist_token_when_set() {
        let ctx = SessionContext::new(InMemoryTokenStore::default());
        ctx.set_token("xyz").await.unwrap();

        assert!(ctx.is_authenticated());
        assert_eq!(ctx.store.stored().as_deref(), Some("xyz"));
    }

    #[tokio::test]
    async fn should_forget_token_when_cleared() {
        let ctx = SessionContext::new(InMemoryTokenStore::holding("abc"));
        ctx.init().await.unwrap();
        ctx.clear().await.unwrap();

        assert!(!ctx.is_authenticated());
        assert!(ctx.store.stored().is_none());
    }

    #[tokio::test]
    async fn should_clear_session_on_unauthorized_result() {
        let ctx = SessionContext::new(InMemoryTokenStore::holding("stale"));
        ctx.init().await.unwrap();

        let result: Result<(), _> = ctx.observe(Err(HomeStockError::Unauthorized)).await;
        assert!(matches!(result, Err(HomeStockError::Unauthorized)));
        assert!(!ctx.is_authenticated());
        assert!(ctx.store.stored().is_none());
    }

    #[tokio::test]
    async fn should_keep_session_on_other_results() {
        let ctx = SessionContext::new(InMemoryTokenStore::holding("abc"));
        ctx.init().await.unwrap();

        let ok = ctx.observe(Ok(7)).await.unwrap();
        assert_eq!(ok, 7);
        assert!(ctx.is_authenticated());
    }
}
