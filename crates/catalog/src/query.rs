//! Filtered views over the catalog.
//!
//! Views are derived, never stored: every change of category, search term,
//! or catalog contents recomputes the view from the full catalog. Nothing
//! here mutates the catalog.

use catalog_keeper_core::{Catalog, CategorySelector, Product};

/// Products whose category passes `selector`, in catalog order.
///
/// [`CategorySelector::All`] keeps everything; an unknown selector keeps
/// nothing.
#[must_use]
pub fn filter_by_category<'a, I>(products: I, selector: &CategorySelector) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|p| selector.matches(p.category()))
        .collect()
}

/// Products whose name contains `term`, ignoring case, in input order.
///
/// An empty term keeps everything.
#[must_use]
pub fn filter_by_search<'a, I>(products: I, term: &str) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    if term.is_empty() {
        return products.into_iter().collect();
    }
    let needle = term.to_lowercase();
    products
        .into_iter()
        .filter(|p| p.name().to_lowercase().contains(&needle))
        .collect()
}

/// Category filter, then search filter, both applied to the full catalog.
#[must_use]
pub fn compose<'a>(
    catalog: &'a Catalog,
    selector: &CategorySelector,
    term: &str,
) -> Vec<&'a Product> {
    filter_by_search(filter_by_category(catalog, selector), term)
}

/// The inputs of a filtered view: selected category and search term.
///
/// This is the state a screen keeps; [`CatalogQuery::apply`] turns it into
/// a [`FilteredView`] of whatever the catalog currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub selector: CategorySelector,
    pub term: String,
}

impl CatalogQuery {
    /// A query that shows every product.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category selector.
    #[must_use]
    pub fn with_category(mut self, selector: impl Into<CategorySelector>) -> Self {
        self.selector = selector.into();
        self
    }

    /// Set the search term.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    /// Compute the view over `catalog`.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> FilteredView<'a> {
        FilteredView {
            products: compose(catalog, &self.selector, &self.term),
        }
    }
}

/// A derived subsequence of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView<'a> {
    products: Vec<&'a Product>,
}

impl<'a> FilteredView<'a> {
    /// Products in the view, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[&'a Product] {
        &self.products
    }

    /// Iterate over products in the view.
    pub fn iter(&self) -> impl Iterator<Item = &'a Product> + '_ {
        self.products.iter().copied()
    }

    /// Number of products in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> IntoIterator for FilteredView<'a> {
    type Item = &'a Product;
    type IntoIter = std::vec::IntoIter<&'a Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.into_iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use catalog_keeper_core::{Category, NewProduct, ProductId};

    fn product(id: i64, name: &str, category: Category) -> Product {
        Product::new(
            ProductId::new(id),
            NewProduct::new(name, "10", "file:///p.jpg", Some(category)).unwrap(),
        )
    }

    fn sample() -> Catalog {
        Catalog::from_products(vec![
            product(1, "Pro Cable", Category::Electronic),
            product(2, "Basic Cable", Category::Electronic),
            product(3, "Pro Case", Category::Accessory),
        ])
        .unwrap()
    }

    fn names<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a str> {
        products.into_iter().map(Product::name).collect()
    }

    #[test]
    fn test_all_returns_everything_in_order() {
        let catalog = sample();
        let view = filter_by_category(&catalog, &CategorySelector::All);
        assert_eq!(names(view), ["Pro Cable", "Basic Cable", "Pro Case"]);
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = sample();
        let view = filter_by_category(&catalog, &Category::Accessory.into());
        assert_eq!(names(view), ["Pro Case"]);

        let view = filter_by_category(&catalog, &Category::Product.into());
        assert!(view.is_empty());
    }

    #[test]
    fn test_unknown_selector_is_empty() {
        let catalog = sample();
        let view = filter_by_category(&catalog, &CategorySelector::parse("Gadgets"));
        assert!(view.is_empty());
    }

    #[test]
    fn test_search_ignores_case() {
        let catalog = sample();
        assert_eq!(
            names(filter_by_search(&catalog, "CABLE")),
            ["Pro Cable", "Basic Cable"]
        );
        assert_eq!(names(filter_by_search(&catalog, "se")), ["Pro Case"]);
        assert!(filter_by_search(&catalog, "lamp").is_empty());
    }

    #[test]
    fn test_empty_term_keeps_everything() {
        let catalog = sample();
        assert_eq!(filter_by_search(&catalog, "").len(), 3);
    }

    #[test]
    fn test_compose_category_then_search() {
        let catalog = sample();
        let view = compose(&catalog, &Category::Electronic.into(), "pro");
        assert_eq!(names(view), ["Pro Cable"]);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new();
        assert!(filter_by_category(&catalog, &CategorySelector::All).is_empty());
        assert!(filter_by_search(&catalog, "x").is_empty());
        assert!(compose(&catalog, &Category::Accessory.into(), "").is_empty());
    }

    #[test]
    fn test_query_recomputes_against_current_catalog() {
        let mut catalog = sample();
        let query = CatalogQuery::new()
            .with_category(Category::Electronic)
            .with_search("cable");
        assert_eq!(query.apply(&catalog).len(), 2);

        catalog.remove(ProductId::new(2));
        let view = query.apply(&catalog);
        assert_eq!(names(view.iter()), ["Pro Cable"]);
    }

    #[test]
    fn test_default_query_shows_all() {
        let catalog = sample();
        let view = CatalogQuery::new().apply(&catalog);
        assert_eq!(view.len(), catalog.len());
        assert!(!view.is_empty());
    }
}
