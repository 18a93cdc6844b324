//! In-process inventory backed by a fixed catalog.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{CatalogProduct, FetchError, InventoryClient, ProductId, Stock};

/// Catalog document in the same shape the mock REST server serves:
/// `{"products": [...], "stock": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
    #[serde(default)]
    pub stock: Vec<Stock>,
}

#[derive(Debug, Default)]
struct Catalog {
    products: HashMap<ProductId, CatalogProduct>,
    stock: HashMap<ProductId, i64>,
    offline: bool,
    requests: u64,
}

/// Inventory answering from memory.
///
/// Used for offline runs of the CLI and as a test double. Clones share
/// state, so stock can be changed while a store holds another clone.
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
    catalog: Arc<RwLock<Catalog>>,
}

impl StaticInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a catalog document.
    pub fn from_snapshot(snapshot: InventorySnapshot) -> Self {
        let inventory = Self::new();
        {
            let mut catalog = inventory.write();
            for product in snapshot.products {
                catalog.products.insert(product.id, product);
            }
            for stock in snapshot.stock {
                catalog.stock.insert(stock.id, stock.amount);
            }
        }
        inventory
    }

    /// Parse a catalog document from JSON.
    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(FetchError::ParseError(
                "inventory document must be a JSON object".to_string(),
            ));
        }
        let snapshot: InventorySnapshot = serde_json::from_value(value)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Add a product with `stock` units available.
    pub fn with_product(self, product: CatalogProduct, stock: i64) -> Self {
        {
            let mut catalog = self.write();
            catalog.stock.insert(product.id, stock);
            catalog.products.insert(product.id, product);
        }
        self
    }

    /// Set the stock level for a product.
    pub fn set_stock(&self, id: ProductId, amount: i64) {
        self.write().stock.insert(id, amount);
    }

    /// Simulate the service being unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.write().offline = offline;
    }

    /// Number of queries answered or refused so far.
    pub fn request_count(&self) -> u64 {
        self.read().requests
    }

    fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.catalog.write().unwrap_or_else(|e| e.into_inner())
    }

    fn begin_request(&self) -> Result<(), FetchError> {
        let mut catalog = self.write();
        catalog.requests += 1;
        if catalog.offline {
            return Err(FetchError::RequestError("inventory offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryClient for StaticInventory {
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        self.begin_request()?;
        self.read()
            .stock
            .get(&id)
            .map(|amount| Stock::new(id, *amount))
            .ok_or_else(|| FetchError::NotFound(format!("/stock/{}", id)))
    }

    async fn product(&self, id: ProductId) -> Result<CatalogProduct, FetchError> {
        self.begin_request()?;
        self.read()
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(format!("/products/{}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DB: &str = r#"{
        "products": [
            {"id": 1, "title": "Tênis de Caminhada", "price": 179.9, "imageUrl": "https://img/1.jpg"},
            {"id": 2, "title": "Tênis VR Caminhada", "price": 139.9, "imageUrl": "https://img/2.jpg"}
        ],
        "stock": [
            {"id": 1, "amount": 3},
            {"id": 2, "amount": 5}
        ]
    }"#;

    #[tokio::test]
    async fn test_from_json() {
        let inventory = StaticInventory::from_json(DB).unwrap();
        assert_eq!(inventory.stock(ProductId::new(2)).await.unwrap().amount, 5);
        assert_eq!(
            inventory.product(ProductId::new(1)).await.unwrap().title,
            "Tênis de Caminhada"
        );
        assert_eq!(inventory.request_count(), 2);
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let inventory = StaticInventory::from_json(DB).unwrap();
        let err = inventory.stock(ProductId::new(99)).await.unwrap_err();
        assert_eq!(err, FetchError::NotFound("/stock/99".to_string()));
    }

    #[tokio::test]
    async fn test_offline_and_stock_changes() {
        let inventory = StaticInventory::from_json(DB).unwrap();
        let handle = inventory.clone();

        handle.set_offline(true);
        assert!(inventory.stock(ProductId::new(1)).await.is_err());

        handle.set_offline(false);
        handle.set_stock(ProductId::new(1), 0);
        assert_eq!(inventory.stock(ProductId::new(1)).await.unwrap().amount, 0);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            StaticInventory::from_json("[]"),
            Err(FetchError::ParseError(_))
        ));
        assert!(matches!(
            StaticInventory::from_json("[[], []]"),
            Err(FetchError::ParseError(_))
        ));
        assert!(matches!(
            StaticInventory::from_json("{\"stock\": "),
            Err(FetchError::ParseError(_))
        ));
    }

    #[test]
    fn test_from_json_empty_object() {
        let inventory = StaticInventory::from_json("{}").unwrap();
        assert_eq!(inventory.request_count(), 0);
    }
}
