//! Catalog error type.
//!
//! Callers need to tell "fix your input" apart from "retry the operation":
//! [`CatalogError::is_input_error`] and [`CatalogError::is_retryable`] make
//! that split without matching on every variant.

use thiserror::Error;

use catalog_keeper_core::{CatalogIntegrityError, ProductId, ValidationError};

use crate::store::StoreError;

/// Errors returned by catalog and session operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required product field is missing.
    #[error("invalid product: {0}")]
    Validation(#[from] ValidationError),

    /// A product with the same name (ignoring case) already exists.
    #[error("product already exists: {0}")]
    DuplicateName(String),

    /// A product with the same id already exists.
    #[error("product id already in use: {0}")]
    DuplicateId(ProductId),

    /// The backing store could not be read.
    #[error("failed to read from backing store: {0}")]
    StorageRead(#[source] StoreError),

    /// The backing store could not be written.
    #[error("failed to write to backing store: {0}")]
    StorageWrite(#[source] StoreError),

    /// The stored catalog is unreadable, malformed, or violates the catalog
    /// invariants.
    #[error("stored catalog is corrupt: {0}")]
    Deserialization(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The catalog could not be encoded for storage.
    #[error("failed to encode catalog: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Every product id has been used.
    #[error("no product ids left to assign")]
    IdsExhausted,

    /// No session is active.
    #[error("no active session")]
    Unauthorized,
}

impl CatalogError {
    /// Whether the caller should correct its input rather than retry.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::DuplicateName(_))
    }

    /// Whether retrying the same operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::StorageRead(err) | Self::StorageWrite(err) => err.is_transient(),
            _ => false,
        }
    }
}

impl From<CatalogIntegrityError> for CatalogError {
    fn from(err: CatalogIntegrityError) -> Self {
        match err {
            CatalogIntegrityError::DuplicateName(name) => Self::DuplicateName(name),
            CatalogIntegrityError::DuplicateId(id) => Self::DuplicateId(id),
        }
    }
}

/// Result type alias for `CatalogError`.
pub type Result<T> = std::result::Result<T, CatalogError>;
