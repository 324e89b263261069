//! Product categories and category selectors.

use serde::{Deserialize, Serialize};

/// Product category.
///
/// Stored by variant name. Catalogs written before categories were
/// introduced have no `category` field at all; those records read as
/// [`Category::Uncategorized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    #[serde(alias = "Uncategory")]
    Uncategorized,
    Accessory,
    Electronic,
    Product,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Self; 4] = [
        Self::Uncategorized,
        Self::Accessory,
        Self::Electronic,
        Self::Product,
    ];

    /// The stored name of this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uncategorized => "Uncategorized",
            Self::Accessory => "Accessory",
            Self::Electronic => "Electronic",
            Self::Product => "Product",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uncategorized" | "uncategory" => Ok(Self::Uncategorized),
            "accessory" => Ok(Self::Accessory),
            "electronic" => Ok(Self::Electronic),
            "product" => Ok(Self::Product),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// Which categories a filtered view shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelector {
    /// Wildcard: every product regardless of category.
    #[default]
    All,
    /// Only products in the given category.
    Only(Category),
    /// A selector that names no known category. Matches nothing.
    Unknown(String),
}

impl CategorySelector {
    /// Sentinel text for the wildcard selector.
    pub const ALL: &'static str = "All";

    /// Parse a selector from menu or command-line text.
    ///
    /// Never fails: text that is neither `All` nor a category name yields
    /// [`CategorySelector::Unknown`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case(Self::ALL) {
            return Self::All;
        }
        s.parse::<Category>()
            .map_or_else(|_| Self::Unknown(s.to_owned()), Self::Only)
    }

    /// Whether a product in `category` passes this selector.
    #[must_use]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => *selected == category,
            Self::Unknown(_) => false,
        }
    }
}

impl From<Category> for CategorySelector {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

impl std::fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL),
            Self::Only(category) => write!(f, "{category}"),
            Self::Unknown(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_uncategorized() {
        assert_eq!(Category::default(), Category::Uncategorized);
    }

    #[test]
    fn test_deserialize_legacy_spelling() {
        let category: Category = serde_json::from_str("\"Uncategory\"").unwrap();
        assert_eq!(category, Category::Uncategorized);
        assert_eq!(
            serde_json::to_string(&category).unwrap(),
            "\"Uncategorized\""
        );
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!(
            "electronic".parse::<Category>().unwrap(),
            Category::Electronic
        );
        assert!("Gadget".parse::<Category>().is_err());
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!(CategorySelector::parse("All"), CategorySelector::All);
        assert_eq!(CategorySelector::parse("all"), CategorySelector::All);
        assert_eq!(
            CategorySelector::parse("Accessory"),
            CategorySelector::Only(Category::Accessory)
        );
        assert_eq!(
            CategorySelector::parse("Gadget"),
            CategorySelector::Unknown("Gadget".to_owned())
        );
    }

    #[test]
    fn test_selector_matches() {
        assert!(CategorySelector::All.matches(Category::Product));
        assert!(CategorySelector::Only(Category::Product).matches(Category::Product));
        assert!(!CategorySelector::Only(Category::Product).matches(Category::Accessory));
        for category in Category::ALL {
            assert!(!CategorySelector::Unknown("x".to_owned()).matches(category));
        }
    }
}
