//! Catalog Keeper - local product catalog.
//!
//! This crate owns everything that touches storage or the network:
//!
//! - [`store`] - The key-value backing store trait with in-memory and
//!   file-backed implementations, plus bounded retry
//! - [`catalog`] - The catalog store: load, add, remove, list with
//!   write-through persistence and duplicate-name prevention
//! - [`query`] - Category and name-search filtered views
//! - [`session`] - The session gate that guards catalog access
//! - [`auth`] - Login client for the external authentication endpoint
//! - [`config`] - Configuration loaded from environment variables
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use catalog_keeper::query::CatalogQuery;
//! use catalog_keeper::session::{SessionGate, SessionToken};
//! use catalog_keeper::store::MemoryStore;
//! use catalog_keeper_core::{Category, CategorySelector, ProductDraft};
//!
//! # async fn demo() -> Result<(), catalog_keeper::CatalogError> {
//! let gate = SessionGate::new(Arc::new(MemoryStore::new()));
//! if let Some(token) = SessionToken::new("token-from-login") {
//!     gate.begin_session(&token).await?;
//! }
//!
//! let mut catalog = gate.open_catalog().await?;
//! catalog
//!     .add(ProductDraft::new("Pro Cable", "199", "file:///cable.jpg").with_category(Category::Electronic))
//!     .await?;
//!
//! let view = CatalogQuery::new()
//!     .with_category(CategorySelector::Only(Category::Electronic))
//!     .with_search("pro")
//!     .apply(catalog.list());
//! assert_eq!(view.len(), 1);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod query;
pub mod session;
pub mod store;

pub use auth::{AuthClient, AuthError, Credentials};
pub use catalog::{CatalogStore, IdGenerator};
pub use config::{AuthConfig, CatalogConfig, ConfigError};
pub use error::{CatalogError, Result};
pub use session::{SessionGate, SessionState, SessionToken};
pub use store::{FileStore, KeyValueStore, MemoryStore, RetryPolicy, RetryingStore, StoreError};
