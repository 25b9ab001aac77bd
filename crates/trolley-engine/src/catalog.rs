//! Catalog service seam and in-memory implementation.
//!
//! The product/stock service is an external collaborator reached over an
//! opaque transport; the engine only depends on this trait. A production
//! implementation wraps whatever HTTP client the host application uses
//! (`GET /products/{id}`, `GET /stock/{id}`); [`InMemoryCatalog`] serves
//! tests and local development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;

use trolley_core::{ProductId, ProductRecord, Stock};

/// Catalog fetch failures.
///
/// Both variants are the same thing to the mutation engine — no usable
/// data came back, so the operation fails without touching the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Transport-level failure: network down, timeout, 5xx, malformed body.
    #[error("Catalog service unavailable: {0}")]
    Unavailable(String),

    /// The service answered but knows no such product.
    #[error("Product not found in catalog: {0}")]
    NotFound(ProductId),
}

/// Read-only access to the external product/stock service.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetches the product record for `id` (`GET /products/{id}`).
    async fn fetch_product(&self, id: ProductId) -> Result<ProductRecord, CatalogError>;

    /// Fetches the current stock level for `id` (`GET /stock/{id}`).
    ///
    /// Stock is a point-in-time snapshot; callers must not cache it beyond
    /// the single check it was fetched for.
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, CatalogError>;
}

#[derive(Debug, Default)]
struct CatalogState {
    products: HashMap<ProductId, ProductRecord>,
    stock: HashMap<ProductId, i64>,
    offline: bool,
}

/// In-memory catalog for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a product record.
    pub fn insert_product(&self, record: ProductRecord) {
        self.state.write().unwrap().products.insert(record.id, record);
    }

    /// Sets the stock level for a product.
    pub fn set_stock(&self, id: impl Into<ProductId>, amount: i64) {
        self.state.write().unwrap().stock.insert(id.into(), amount);
    }

    /// Simulates the service being unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.state.write().unwrap().offline = offline;
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn fetch_product(&self, id: ProductId) -> Result<ProductRecord, CatalogError> {
        // Yield once so callers actually suspend here, like a real
        // network hop would make them.
        tokio::task::yield_now().await;

        let state = self.state.read().unwrap();
        if state.offline {
            return Err(CatalogError::Unavailable("catalog offline".to_string()));
        }
        state
            .products
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        tokio::task::yield_now().await;

        let state = self.state.read().unwrap();
        if state.offline {
            return Err(CatalogError::Unavailable("catalog offline".to_string()));
        }
        state
            .stock
            .get(&id)
            .map(|&amount| Stock { id, amount })
            .ok_or(CatalogError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_known_product() {
        let catalog = InMemoryCatalog::new();
        catalog.insert_product(ProductRecord::bare(1).with_detail("title", "Shoe"));

        let record = catalog.fetch_product(ProductId(1)).await.unwrap();
        assert_eq!(record.id, ProductId(1));
    }

    #[tokio::test]
    async fn test_fetch_unknown_product_is_not_found() {
        let catalog = InMemoryCatalog::new();
        assert_eq!(
            catalog.fetch_product(ProductId(1)).await.unwrap_err(),
            CatalogError::NotFound(ProductId(1))
        );
    }

    #[tokio::test]
    async fn test_offline_catalog_is_unavailable() {
        let catalog = InMemoryCatalog::new();
        catalog.insert_product(ProductRecord::bare(1));
        catalog.set_stock(1, 5);
        catalog.set_offline(true);

        assert!(matches!(
            catalog.fetch_product(ProductId(1)).await.unwrap_err(),
            CatalogError::Unavailable(_)
        ));
        assert!(matches!(
            catalog.fetch_stock(ProductId(1)).await.unwrap_err(),
            CatalogError::Unavailable(_)
        ));
    }

    #[tokio::test]
    async fn test_fetch_stock_snapshot() {
        let catalog = InMemoryCatalog::new();
        catalog.set_stock(2, 7);

        let stock = catalog.fetch_stock(ProductId(2)).await.unwrap();
        assert_eq!(stock.amount, 7);
    }
}
