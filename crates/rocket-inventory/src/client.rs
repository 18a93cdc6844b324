//! Inventory client abstraction.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{CatalogProduct, FetchError, ProductId, Stock};

/// Read access to product metadata and stock levels.
///
/// Any failure (transport, non-2xx, undecodable body, unknown id) is a
/// [`FetchError`]; callers treat every error as "the query failed".
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Current stock for a product (`GET /stock/{id}`).
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError>;

    /// Catalog metadata for a product (`GET /products/{id}`).
    async fn product(&self, id: ProductId) -> Result<CatalogProduct, FetchError>;
}

#[async_trait]
impl<T: InventoryClient + ?Sized> InventoryClient for Arc<T> {
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        (**self).stock(id).await
    }

    async fn product(&self, id: ProductId) -> Result<CatalogProduct, FetchError> {
        (**self).product(id).await
    }
}
