//! Catalog Keeper Core - Product and catalog types.
//!
//! This crate provides the types shared by every Catalog Keeper component:
//! - `catalog-keeper` - Catalog store, query engine and session gate
//! - `cli` - The `ck` command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage
//! access, no HTTP clients. Anything that touches the backing store lives in
//! `catalog-keeper`.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, categories, products and the catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
