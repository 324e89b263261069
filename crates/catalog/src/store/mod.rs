//! Key-value backing store.
//!
//! The catalog and the session gate persist through a narrow async
//! interface: `get`, `set` and `remove` of opaque strings under logical
//! keys. Implementations:
//!
//! - [`MemoryStore`] - process memory, for tests and ephemeral sessions
//! - [`FileStore`] - one file per key in a data directory
//! - [`RetryingStore`] - wraps another store with bounded retry

mod file;
mod memory;
mod retry;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use retry::{RetryPolicy, RetryingStore};

/// Logical keys used by the catalog.
pub mod keys {
    /// Key holding the JSON array of products.
    pub const PRODUCTS: &str = "products";

    /// Key holding the session token.
    pub const TOKEN: &str = "token";
}

/// Errors returned by a backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be stored by this backend.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The store cannot be reached right now.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The stored value exists but is not text.
    #[error("stored value for {key} is not valid UTF-8: {source}")]
    Corrupt {
        key: String,
        source: std::string::FromUtf8Error,
    },
}

impl StoreError {
    /// Whether the same call may succeed if repeated.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Unavailable(_))
    }
}

/// Durable string-keyed storage.
///
/// `set` overwrites; `remove` of a missing key succeeds.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value stored under `key`.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// A backing store shared by the catalog and the session gate.
pub type SharedStore = Arc<dyn KeyValueStore>;
