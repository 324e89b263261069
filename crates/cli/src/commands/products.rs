//! Product commands: add, list, remove.

use catalog_keeper::SessionGate;
use catalog_keeper::query::CatalogQuery;
use catalog_keeper_core::{Product, ProductDraft, ProductId};
use tracing::info;

use super::CommandError;

fn log_product(product: &Product) {
    info!(
        "{}  {}  {}  {}  {}",
        product.id(),
        product.name(),
        product.price(),
        product.category(),
        product.image()
    );
}

/// Add a product to the catalog.
///
/// # Errors
///
/// Returns `CommandError::Unauthorized` without a session,
/// `CommandError::Input` for missing fields or a duplicate name, and
/// `CommandError::Storage` if the catalog cannot be read or written.
pub async fn add(gate: &SessionGate, draft: ProductDraft) -> Result<Product, CommandError> {
    let mut catalog = gate.open_catalog().await?;
    let product = catalog.add(draft).await?;
    info!("Added product {}", product.id());
    Ok(product)
}

/// List the products matching `query`, in catalog order.
///
/// # Errors
///
/// Returns `CommandError::Unauthorized` without a session and
/// `CommandError::Storage` if the catalog cannot be read.
pub async fn list(gate: &SessionGate, query: &CatalogQuery) -> Result<Vec<Product>, CommandError> {
    let catalog = gate.open_catalog().await?;
    let view = query.apply(catalog.list());

    if view.is_empty() {
        info!("No products found");
    }
    for product in view.iter() {
        log_product(product);
    }
    Ok(view.into_iter().cloned().collect())
}

/// Remove a product. Returns whether it existed.
///
/// # Errors
///
/// Returns `CommandError::Unauthorized` without a session and
/// `CommandError::Storage` if the catalog cannot be read or written.
pub async fn remove(gate: &SessionGate, id: ProductId) -> Result<bool, CommandError> {
    let mut catalog = gate.open_catalog().await?;
    let existed = catalog.get(id).is_some();
    catalog.remove(id).await?;

    if existed {
        info!("Removed product {id}");
    } else {
        info!("No product with id {id}");
    }
    Ok(existed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use catalog_keeper::{MemoryStore, SessionToken};
    use catalog_keeper_core::{Category, CategorySelector};

    use super::*;

    async fn logged_in() -> SessionGate {
        let gate = SessionGate::new(Arc::new(MemoryStore::new()));
        gate.begin_session(&SessionToken::new("abc").unwrap())
            .await
            .unwrap();
        gate
    }

    #[tokio::test]
    async fn test_commands_require_session() {
        let gate = SessionGate::new(Arc::new(MemoryStore::new()));
        let draft = ProductDraft::new("Lamp", "30", "file:///lamp.jpg");
        assert!(matches!(
            add(&gate, draft).await,
            Err(CommandError::Unauthorized)
        ));
        assert!(matches!(
            list(&gate, &CatalogQuery::new()).await,
            Err(CommandError::Unauthorized)
        ));
        assert!(matches!(
            remove(&gate, ProductId::new(1)).await,
            Err(CommandError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_add_list_remove() {
        let gate = logged_in().await;
        let cable = add(
            &gate,
            ProductDraft::new("Pro Cable", "19", "file:///cable.jpg")
                .with_category(Category::Electronic),
        )
        .await
        .unwrap();
        add(&gate, ProductDraft::new("Pro Case", "9", "file:///case.jpg"))
            .await
            .unwrap();

        let query = CatalogQuery::new().with_search("pro");
        assert_eq!(list(&gate, &query).await.unwrap().len(), 2);

        let query = query.with_category(CategorySelector::Only(Category::Electronic));
        let listed = list(&gate, &query).await.unwrap();
        assert_eq!(listed, vec![cable.clone()]);

        assert!(remove(&gate, cable.id()).await.unwrap());
        assert!(!remove(&gate, cable.id()).await.unwrap());
        assert!(list(&gate, &query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_is_input_error() {
        let gate = logged_in().await;
        add(&gate, ProductDraft::new("Lamp", "30", "file:///lamp.jpg"))
            .await
            .unwrap();
        let err = add(&gate, ProductDraft::new("LAMP", "31", "file:///lamp2.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Input(_)));
    }
}
