//! Product records.
//!
//! [`NewProduct`] is a validated candidate coming from user input;
//! [`Product`] is a catalog entry with an assigned id. Both check their
//! required fields on construction, and `Product` re-checks them when it is
//! deserialized from storage. User input is trimmed; stored text is kept
//! exactly as written so older records round-trip unchanged.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::id::ProductId;
use super::price::Price;

/// A required product field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Name,
    Price,
    Image,
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Price => f.write_str("price"),
            Self::Image => f.write_str("image"),
        }
    }
}

/// Errors that can occur when validating a product.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("product {0} is required")]
    MissingField(ProductField),
}

/// Trim a required text field, rejecting empty input.
fn required(value: &str, field: ProductField) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

/// Check a stored text field, keeping it exactly as stored.
fn stored(value: String, field: ProductField) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}

/// Raw product input as a form or command line supplies it.
///
/// Nothing is checked until [`ProductDraft::validate`] turns it into a
/// [`NewProduct`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub image: String,
    #[serde(default)]
    pub category: Option<Category>,
}

impl ProductDraft {
    /// Create a draft without a category.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            image: image.into(),
            category: None,
        }
    }

    /// Set the category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` for the first empty field.
    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        NewProduct::new(&self.name, &self.price, &self.image, self.category)
    }
}

/// A product candidate that has passed field validation.
///
/// ```
/// use catalog_keeper_core::{Category, NewProduct};
///
/// let candidate = NewProduct::new("Pro Cable", "199", "file:///cable.jpg", None).unwrap();
/// assert_eq!(candidate.category(), Category::Uncategorized);
///
/// assert!(NewProduct::new("", "199", "file:///cable.jpg", None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    name: String,
    price: Price,
    image: String,
    category: Category,
}

impl NewProduct {
    /// Validate a product candidate.
    ///
    /// Text fields are trimmed. A missing category defaults to
    /// [`Category::Uncategorized`].
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` for the first of name, price
    /// or image that is empty.
    pub fn new(
        name: &str,
        price: &str,
        image: &str,
        category: Option<Category>,
    ) -> Result<Self, ValidationError> {
        let name = required(name, ProductField::Name)?;
        let price = Price::parse(price)?;
        let image = required(image, ProductField::Image)?;

        Ok(Self {
            name,
            price,
            image,
            category: category.unwrap_or_default(),
        })
    }

    /// Returns the candidate name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the candidate price.
    #[must_use]
    pub const fn price(&self) -> &Price {
        &self.price
    }

    /// Returns the candidate image reference.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns the candidate category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    id: ProductId,
    name: String,
    price: Price,
    image: String,
    category: Category,
}

impl Product {
    /// Create a catalog entry from a validated candidate.
    #[must_use]
    pub fn new(id: ProductId, candidate: NewProduct) -> Self {
        Self {
            id,
            name: candidate.name,
            price: candidate.price,
            image: candidate.image,
            category: candidate.category,
        }
    }

    /// Returns the product id.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    /// Returns the product name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the product price.
    #[must_use]
    pub const fn price(&self) -> &Price {
        &self.price
    }

    /// Returns the image reference.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns the product category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Whether this product's name equals `name`, ignoring case.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Storage shape of a product, checked before it becomes a [`Product`].
#[derive(Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    price: String,
    image: String,
    #[serde(default)]
    category: Category,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ValidationError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            name: stored(record.name, ProductField::Name)?,
            price: Price::try_from(record.price)?,
            image: stored(record.image, ProductField::Image)?,
            category: record.category,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn candidate(name: &str) -> NewProduct {
        NewProduct::new(name, "10", "file:///a.jpg", Some(Category::Accessory)).unwrap()
    }

    #[test]
    fn test_new_product_missing_fields() {
        assert_eq!(
            NewProduct::new("", "10", "img", None),
            Err(ValidationError::MissingField(ProductField::Name))
        );
        assert_eq!(
            NewProduct::new("Cable", " ", "img", None),
            Err(ValidationError::MissingField(ProductField::Price))
        );
        assert_eq!(
            NewProduct::new("Cable", "10", "", None),
            Err(ValidationError::MissingField(ProductField::Image))
        );
    }

    #[test]
    fn test_new_product_trims_fields() {
        let product = NewProduct::new("  Cable ", " 10 ", " img ", None).unwrap();
        assert_eq!(product.name(), "Cable");
        assert_eq!(product.price().as_str(), "10");
        assert_eq!(product.image(), "img");
        assert_eq!(product.category(), Category::Uncategorized);
    }

    #[test]
    fn test_draft_validate() {
        let draft =
            ProductDraft::new("Lamp", "30", "file:///l.jpg").with_category(Category::Electronic);
        let candidate = draft.validate().unwrap();
        assert_eq!(candidate.category(), Category::Electronic);

        let missing_image = ProductDraft::new("Lamp", "30", "");
        assert_eq!(
            missing_image.validate(),
            Err(ValidationError::MissingField(ProductField::Image))
        );
    }

    #[test]
    fn test_has_name_ignores_case() {
        let product = Product::new(ProductId::new(1), candidate("Pro Cable"));
        assert!(product.has_name("pro cable"));
        assert!(product.has_name("PRO CABLE"));
        assert!(!product.has_name("Pro Cables"));
    }

    #[test]
    fn test_serialized_layout() {
        let product = Product::new(ProductId::new(1_700_000_000_000), candidate("Case"));
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1_700_000_000_000_i64,
                "name": "Case",
                "price": "10",
                "image": "file:///a.jpg",
                "category": "Accessory",
            })
        );
    }

    #[test]
    fn test_deserialize_without_category() {
        let product: Product =
            serde_json::from_str(r#"{"id":5,"name":"Lamp","price":"30","image":"file:///l.jpg"}"#)
                .unwrap();
        assert_eq!(product.id(), ProductId::new(5));
        assert_eq!(product.category(), Category::Uncategorized);
    }

    #[test]
    fn test_deserialize_keeps_stored_whitespace() {
        let product: Product =
            serde_json::from_str(r#"{"id":5,"name":"Lamp ","price":" 30","image":"x "}"#)
                .unwrap();
        assert_eq!(product.name(), "Lamp ");
        assert_eq!(product.price().as_str(), " 30");
        assert_eq!(product.image(), "x ");

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["name"], "Lamp ");
        assert_eq!(value["price"], " 30");
    }

    #[test]
    fn test_deserialize_rejects_blank_fields() {
        for record in [
            r#"{"id":5,"name":"  ","price":"30","image":"x"}"#,
            r#"{"id":5,"name":"Lamp","price":" ","image":"x"}"#,
            r#"{"id":5,"name":"Lamp","price":"30","image":""}"#,
        ] {
            assert!(serde_json::from_str::<Product>(record).is_err());
        }
    }

    #[test]
    fn test_deserialize_rejects_empty_name() {
        let result: Result<Product, _> =
            serde_json::from_str(r#"{"id":5,"name":"","price":"30","image":"x"}"#);
        assert!(result.is_err());
    }
}
