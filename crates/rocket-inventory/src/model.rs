//! Inventory wire types.

use serde::{Deserialize, Serialize};

use crate::ProductId;

/// Available quantity for a product, as reported by `GET /stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    /// Units available. May be zero or negative when oversold.
    pub amount: i64,
}

impl Stock {
    pub fn new(id: ProductId, amount: i64) -> Self {
        Self { id, amount }
    }

    /// Check if at least one unit is available.
    pub fn is_available(&self) -> bool {
        self.amount >= 1
    }

    /// Check if `quantity` units can be held in a cart.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity <= self.amount
    }
}

/// Catalog metadata, as returned by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image_url: String,
}
