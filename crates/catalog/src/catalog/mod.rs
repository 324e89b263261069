//! Catalog store.
//!
//! The single source of truth for the product collection. Every mutation
//! goes through [`CatalogStore`], which writes the full catalog back to the
//! backing store before returning. The in-memory catalog is replaced only
//! after that write succeeds; when a write fails the store reloads from the
//! backing store so memory and storage agree again.
//!
//! Mutations take `&mut self`: one owner issues one operation at a time, so
//! there is no locking here.

mod ids;

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use catalog_keeper_core::{Catalog, Product, ProductDraft, ProductId};

use crate::error::{CatalogError, Result};
use crate::store::{SharedStore, StoreError, keys};

pub use ids::IdGenerator;

/// Owns the canonical catalog and persists it write-through.
pub struct CatalogStore {
    backing: SharedStore,
    ids: Arc<IdGenerator>,
    catalog: Catalog,
    loaded: bool,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("ids", &self.ids)
            .field("catalog", &self.catalog)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

impl CatalogStore {
    /// Create a store over `backing`. Nothing is read until [`Self::load`].
    #[must_use]
    pub fn new(backing: SharedStore) -> Self {
        Self::with_ids(backing, Arc::new(IdGenerator::new()))
    }

    /// Create a store that draws ids from a shared generator.
    ///
    /// Sharing the generator keeps ids increasing across successive stores
    /// opened in the same process.
    #[must_use]
    pub fn with_ids(backing: SharedStore, ids: Arc<IdGenerator>) -> Self {
        Self {
            backing,
            ids,
            catalog: Catalog::new(),
            loaded: false,
        }
    }

    /// Whether the catalog has been loaded from the backing store.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Read the catalog from the backing store, replacing the in-memory copy.
    ///
    /// A missing record yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::StorageRead` if the backing store fails, or
    /// `CatalogError::Deserialization` if the stored payload is malformed.
    /// The in-memory catalog is left untouched on error.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<&Catalog> {
        let catalog = self.read_catalog().await?;
        self.replace(catalog);
        info!(count = self.catalog.len(), "Loaded catalog");
        Ok(&self.catalog)
    }

    /// Add a product and persist the catalog.
    ///
    /// Loads the catalog first if this store has not loaded it yet.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Validation` if name, price or image is empty; nothing
    ///   is written.
    /// - `CatalogError::DuplicateName` if the name exists, ignoring case;
    ///   nothing is written.
    /// - `CatalogError::StorageRead` / `CatalogError::Deserialization` if the
    ///   initial load fails.
    /// - `CatalogError::IdsExhausted` if the largest id is already in use.
    /// - `CatalogError::StorageWrite` if persisting fails.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add(&mut self, draft: ProductDraft) -> Result<Product> {
        let candidate = draft.validate()?;
        self.ensure_loaded().await?;

        if self.catalog.contains_name(candidate.name()) {
            debug!("Rejected duplicate product name");
            return Err(CatalogError::DuplicateName(candidate.name().to_owned()));
        }

        let Some(id) = self.ids.next() else {
            error!("No product ids left to assign");
            return Err(CatalogError::IdsExhausted);
        };
        let product = Product::new(id, candidate);
        let mut updated = self.catalog.clone();
        updated.push(product.clone())?;
        self.persist(updated).await?;

        info!(product_id = %product.id(), category = %product.category(), "Added product");
        Ok(product)
    }

    /// Remove the product with `id` and persist the catalog.
    ///
    /// Removing an id that is not in the catalog succeeds without writing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::StorageWrite` if persisting fails, or a load
    /// error if the catalog had not been loaded yet and loading fails.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, id: ProductId) -> Result<&Catalog> {
        self.ensure_loaded().await?;

        let mut updated = self.catalog.clone();
        if updated.remove(id).is_none() {
            debug!(product_id = %id, "No product to remove");
            return Ok(&self.catalog);
        }
        self.persist(updated).await?;

        info!(product_id = %id, remaining = self.catalog.len(), "Removed product");
        Ok(&self.catalog)
    }

    /// The in-memory catalog. Does not touch the backing store.
    #[must_use]
    pub const fn list(&self) -> &Catalog {
        &self.catalog
    }

    /// Look up a product in the in-memory catalog.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.catalog.get(id)
    }

    async fn ensure_loaded(&mut self) -> Result<()> {
        if !self.loaded {
            self.load().await?;
        }
        Ok(())
    }

    async fn read_catalog(&self) -> Result<Catalog> {
        let payload = match self.backing.get(keys::PRODUCTS).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!("No stored catalog");
                return Ok(Catalog::new());
            }
            Err(err @ StoreError::Corrupt { .. }) => {
                error!(error = %err, "Stored catalog is unreadable");
                return Err(CatalogError::Deserialization(Box::new(err)));
            }
            Err(err) => return Err(CatalogError::StorageRead(err)),
        };

        serde_json::from_str(&payload).map_err(|e| {
            error!(error = %e, "Stored catalog is corrupt");
            CatalogError::Deserialization(Box::new(e))
        })
    }

    fn replace(&mut self, catalog: Catalog) {
        if let Some(max) = catalog.max_id() {
            self.ids.observe(max);
        }
        self.catalog = catalog;
        self.loaded = true;
    }

    async fn persist(&mut self, updated: Catalog) -> Result<()> {
        let payload = serde_json::to_string(&updated).map_err(CatalogError::Serialization)?;

        if let Err(err) = self.backing.set(keys::PRODUCTS, &payload).await {
            warn!(error = %err, "Failed to persist catalog, reloading");
            self.resync().await;
            return Err(CatalogError::StorageWrite(err));
        }

        self.catalog = updated;
        Ok(())
    }

    async fn resync(&mut self) {
        match self.read_catalog().await {
            Ok(catalog) => self.replace(catalog),
            Err(err) => error!(error = %err, "Failed to reload catalog after write failure"),
        }
    }
}
