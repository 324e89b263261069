//! The canonical product collection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize, Serializer};

use super::id::ProductId;
use super::product::Product;

/// Violations of the catalog invariants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogIntegrityError {
    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    /// Two products share a name (ignoring case).
    #[error("duplicate product name: {0}")]
    DuplicateName(String),
}

/// Ordered collection of products.
///
/// Insertion order is display order. Every mutation keeps two invariants:
/// ids are unique, and names are unique ignoring case. Deserialization
/// checks both, so a stored catalog that violates them is rejected rather
/// than loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Product>")]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Build a catalog from products in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if two products share an id or a name.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogIntegrityError> {
        let mut ids = HashSet::with_capacity(products.len());
        let mut names = HashSet::with_capacity(products.len());
        for product in &products {
            if !ids.insert(product.id()) {
                return Err(CatalogIntegrityError::DuplicateId(product.id()));
            }
            if !names.insert(product.name().to_lowercase()) {
                return Err(CatalogIntegrityError::DuplicateName(
                    product.name().to_owned(),
                ));
            }
        }
        Ok(Self { products })
    }

    /// Products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Iterate over products in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Number of products.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Whether a product with this name exists, ignoring case.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.products
            .iter()
            .any(|p| p.name().to_lowercase() == wanted)
    }

    /// The largest id in the catalog.
    #[must_use]
    pub fn max_id(&self) -> Option<ProductId> {
        self.products.iter().map(Product::id).max()
    }

    /// Append a product at the end of the display order.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the catalog unchanged, if the product's id
    /// or name is already present.
    pub fn push(&mut self, product: Product) -> Result<(), CatalogIntegrityError> {
        if self.get(product.id()).is_some() {
            return Err(CatalogIntegrityError::DuplicateId(product.id()));
        }
        if self.contains_name(product.name()) {
            return Err(CatalogIntegrityError::DuplicateName(
                product.name().to_owned(),
            ));
        }
        self.products.push(product);
        Ok(())
    }

    /// Remove the product with `id`, returning it if it was present.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id() == id)?;
        Some(self.products.remove(index))
    }

    /// Consume the catalog, returning its products in display order.
    #[must_use]
    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.products.serialize(serializer)
    }
}

impl TryFrom<Vec<Product>> for Catalog {
    type Error = CatalogIntegrityError;

    fn try_from(products: Vec<Product>) -> Result<Self, Self::Error> {
        Self::from_products(products)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
