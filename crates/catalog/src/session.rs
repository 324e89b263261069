//! Session gate.
//!
//! Catalog access requires an active session: a non-empty token stored
//! under the `token` key. The authentication client writes the token
//! ([`SessionGate::begin_session`]); logging out removes it
//! ([`SessionGate::end_session`]) and never touches product data.
//!
//! [`SessionGate::open_catalog`] is the only way to obtain a
//! [`CatalogStore`] bound to the gate's backing store, so a catalog exists
//! only for the duration of a session.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument};

use crate::catalog::{CatalogStore, IdGenerator};
use crate::error::{CatalogError, Result};
use crate::store::{SharedStore, keys};

/// An authentication token. Redacted in `Debug` output.
#[derive(Debug, Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Wrap a token, or `None` if it is empty.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            return None;
        }
        Some(Self(SecretString::from(token)))
    }

    /// The token text.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Whether catalog access is currently granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticated,
    Unauthenticated,
}

/// Guards catalog access behind a stored session token.
pub struct SessionGate {
    backing: SharedStore,
    ids: Arc<IdGenerator>,
}

impl SessionGate {
    /// Create a gate over `backing`.
    #[must_use]
    pub fn new(backing: SharedStore) -> Self {
        Self {
            backing,
            ids: Arc::new(IdGenerator::new()),
        }
    }

    /// Whether a non-empty token is stored.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::StorageRead` if the backing store fails.
    pub async fn is_authorized(&self) -> Result<bool> {
        Ok(self.token().await?.is_some())
    }

    /// Current session state.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::StorageRead` if the backing store fails.
    pub async fn state(&self) -> Result<SessionState> {
        if self.is_authorized().await? {
            Ok(SessionState::Authenticated)
        } else {
            Ok(SessionState::Unauthenticated)
        }
    }

    /// The stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::StorageRead` if the backing store fails.
    pub async fn token(&self) -> Result<Option<SessionToken>> {
        let stored = self
            .backing
            .get(keys::TOKEN)
            .await
            .map_err(CatalogError::StorageRead)?;
        Ok(stored.and_then(SessionToken::new))
    }

    /// Store `token`, moving the gate to [`SessionState::Authenticated`].
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::StorageWrite` if the backing store fails.
    #[instrument(skip_all)]
    pub async fn begin_session(&self, token: &SessionToken) -> Result<()> {
        self.backing
            .set(keys::TOKEN, token.expose())
            .await
            .map_err(CatalogError::StorageWrite)?;
        info!("Session started");
        Ok(())
    }

    /// Remove the token. Product data is left as is.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::StorageWrite` if the backing store fails.
    #[instrument(skip_all)]
    pub async fn end_session(&self) -> Result<()> {
        self.backing
            .remove(keys::TOKEN)
            .await
            .map_err(CatalogError::StorageWrite)?;
        info!("Session ended");
        Ok(())
    }

    /// Open the catalog for this session and load it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unauthorized` when no session is active, or
    /// any error from [`CatalogStore::load`].
    #[instrument(skip_all)]
    pub async fn open_catalog(&self) -> Result<CatalogStore> {
        if !self.is_authorized().await? {
            debug!("Catalog access denied");
            return Err(CatalogError::Unauthorized);
        }

        let mut store = CatalogStore::with_ids(Arc::clone(&self.backing), Arc::clone(&self.ids));
        store.load().await?;
        Ok(store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::{KeyValueStore, MemoryStore};
    use catalog_keeper_core::ProductDraft;

    fn gate() -> (Arc<MemoryStore>, SessionGate) {
        let backing = Arc::new(MemoryStore::new());
        let gate = SessionGate::new(backing.clone());
        (backing, gate)
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(SessionToken::new("").is_none());
        assert_eq!(SessionToken::new("abc").unwrap().expose(), "abc");
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::new("QpwL5tke4Pnpja7X4").unwrap();
        assert!(!format!("{token:?}").contains("QpwL5tke4Pnpja7X4"));
    }

    #[tokio::test]
    async fn test_unauthenticated_by_default() {
        let (_, gate) = gate();
        assert!(!gate.is_authorized().await.unwrap());
        assert_eq!(gate.state().await.unwrap(), SessionState::Unauthenticated);
        assert!(matches!(
            gate.open_catalog().await,
            Err(CatalogError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_stored_empty_token_is_not_a_session() {
        let backing = Arc::new(MemoryStore::with_entries([(keys::TOKEN, "")]));
        let gate = SessionGate::new(backing);
        assert!(!gate.is_authorized().await.unwrap());
    }

    #[tokio::test]
    async fn test_begin_and_end_session() {
        let (backing, gate) = gate();
        gate.begin_session(&SessionToken::new("abc").unwrap())
            .await
            .unwrap();
        assert_eq!(gate.state().await.unwrap(), SessionState::Authenticated);
        assert_eq!(
            backing.get(keys::TOKEN).await.unwrap().as_deref(),
            Some("abc")
        );

        gate.end_session().await.unwrap();
        assert!(!gate.is_authorized().await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_keeps_products() {
        let (backing, gate) = gate();
        gate.begin_session(&SessionToken::new("abc").unwrap())
            .await
            .unwrap();
        let mut catalog = gate.open_catalog().await.unwrap();
        catalog
            .add(ProductDraft::new("Lamp", "30", "file:///lamp.jpg"))
            .await
            .unwrap();
        drop(catalog);

        gate.end_session().await.unwrap();
        assert!(backing.get(keys::PRODUCTS).await.unwrap().is_some());

        gate.begin_session(&SessionToken::new("def").unwrap())
            .await
            .unwrap();
        let catalog = gate.open_catalog().await.unwrap();
        assert_eq!(catalog.list().len(), 1);
    }

    #[tokio::test]
    async fn test_ids_keep_increasing_across_sessions() {
        let (_, gate) = gate();
        let token = SessionToken::new("abc").unwrap();
        gate.begin_session(&token).await.unwrap();

        let mut first = gate.open_catalog().await.unwrap();
        let a = first
            .add(ProductDraft::new("A", "1", "file:///a.jpg"))
            .await
            .unwrap();
        first.remove(a.id()).await.unwrap();
        drop(first);

        let mut second = gate.open_catalog().await.unwrap();
        let b = second
            .add(ProductDraft::new("B", "1", "file:///b.jpg"))
            .await
            .unwrap();
        assert!(b.id() > a.id());
    }
}
