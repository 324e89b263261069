//! Command implementations.
//!
//! Every command works on a [`SessionGate`] over the configured data
//! directory. Catalog commands go through [`SessionGate::open_catalog`], so
//! they fail with [`CommandError::Unauthorized`] until `ck login` succeeds.

pub mod products;
pub mod session;

use std::sync::Arc;

use catalog_keeper::{
    AuthError, CatalogConfig, CatalogError, FileStore, RetryingStore, SessionGate, StoreError,
};
use thiserror::Error;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// No active session.
    #[error("unauthorized, run `ck login`")]
    Unauthorized,

    /// The user supplied something the catalog refuses.
    #[error("invalid input: {0}")]
    Input(CatalogError),

    /// Reading or writing the catalog failed.
    #[error("storage error: {0}")]
    Storage(CatalogError),

    /// The data directory could not be opened.
    #[error("cannot open data directory: {0}")]
    DataDir(#[from] StoreError),

    /// Login failed.
    #[error("{0}")]
    Auth(#[from] AuthError),
}

impl From<CatalogError> for CommandError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Unauthorized => Self::Unauthorized,
            err if err.is_input_error() => Self::Input(err),
            err => Self::Storage(err),
        }
    }
}

/// Open the session gate over the configured data directory.
///
/// # Errors
///
/// Returns `CommandError::DataDir` if the directory cannot be created.
pub async fn open_gate(config: &CatalogConfig) -> Result<SessionGate, CommandError> {
    let files = FileStore::open(&config.data_dir).await?;
    tracing::debug!(dir = %files.dir().display(), "Opened data directory");
    let backing = RetryingStore::new(files, config.retry);
    Ok(SessionGate::new(Arc::new(backing)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use catalog_keeper_core::{ProductField, ValidationError};

    use super::*;

    #[test]
    fn test_unauthorized_message() {
        let err = CommandError::from(CatalogError::Unauthorized);
        assert_eq!(err.to_string(), "unauthorized, run `ck login`");
    }

    #[test]
    fn test_input_and_storage_errors_are_distinct() {
        let input = CommandError::from(CatalogError::DuplicateName("Lamp".into()));
        assert!(matches!(input, CommandError::Input(_)));
        assert!(input.to_string().starts_with("invalid input"));

        let missing = CommandError::from(CatalogError::from(ValidationError::MissingField(
            ProductField::Price,
        )));
        assert!(matches!(missing, CommandError::Input(_)));

        let storage = CommandError::from(CatalogError::StorageWrite(StoreError::Unavailable(
            "disk full".into(),
        )));
        assert!(matches!(storage, CommandError::Storage(_)));
        assert!(storage.to_string().starts_with("storage error"));
    }

    #[tokio::test]
    async fn test_open_gate_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");
        let mut config = CatalogConfig::from_lookup(|_| None).unwrap();
        config.data_dir.clone_from(&data_dir);

        let gate = open_gate(&config).await.unwrap();
        assert!(data_dir.is_dir());
        assert!(!gate.is_authorized().await.unwrap());
    }
}
