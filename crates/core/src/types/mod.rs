//! Core types for Catalog Keeper.
//!
//! This module provides validated wrappers for the catalog domain.

pub mod catalog;
pub mod category;
pub mod id;
pub mod price;
pub mod product;

pub use catalog::{Catalog, CatalogIntegrityError};
pub use category::{Category, CategorySelector};
pub use id::ProductId;
pub use price::Price;
pub use product::{NewProduct, Product, ProductDraft, ProductField, ValidationError};
