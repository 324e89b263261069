//! Authentication error types.

use thiserror::Error;

use crate::error::CatalogError;

/// Errors that can occur while logging in.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A credential field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The endpoint refused the credentials.
    #[error("login rejected: {0}")]
    Rejected(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The token could not be stored.
    #[error("session error: {0}")]
    Session(#[from] CatalogError),
}
