//! Product price as entered by the user.
//!
//! Prices are kept as the text the user typed: the catalog only requires a
//! price to be present, it does not reject values that fail to parse as a
//! number. [`Price::amount`] offers a decimal view for callers that want to
//! sort or total prices.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::{ProductField, ValidationError};

/// A non-empty product price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(String);

impl Price {
    /// Parse a `Price` from user input.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` if the input is empty or
    /// whitespace only.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField(ProductField::Price));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the price text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the price as a decimal, if the text is a plain number.
    #[must_use]
    pub fn amount(&self) -> Option<Decimal> {
        Decimal::from_str(self.0.trim()).ok()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored prices are kept exactly as written; only blank text is rejected.
impl TryFrom<String> for Price {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(ProductField::Price));
        }
        Ok(Self(value))
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl AsRef<str> for Price {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
