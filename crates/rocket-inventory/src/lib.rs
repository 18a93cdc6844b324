//! Inventory service client for Rocket cart state.
//!
//! The cart validates every mutation against a remote inventory service
//! exposing two read endpoints:
//!
//! - `GET /stock/{id}` → `{id, amount}`
//! - `GET /products/{id}` → `{id, title, price, imageUrl}`
//!
//! [`InventoryClient`] abstracts those queries. [`HttpInventoryClient`] talks
//! to the real service; [`StaticInventory`] answers from memory.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_inventory::{HttpInventoryClient, InventoryClient, ProductId};
//!
//! let client = HttpInventoryClient::new("http://localhost:3333")
//!     .with_timeout(std::time::Duration::from_secs(5));
//!
//! let stock = client.stock(ProductId::new(1)).await?;
//! if stock.is_available() {
//!     let product = client.product(ProductId::new(1)).await?;
//!     println!("{} in stock: {}", product.title, stock.amount);
//! }
//! ```

mod client;
mod error;
mod fixture;
mod http;
mod ids;
mod model;

pub use client::InventoryClient;
pub use error::FetchError;
pub use fixture::{InventorySnapshot, StaticInventory};
pub use http::HttpInventoryClient;
pub use ids::ProductId;
pub use model::{CatalogProduct, Stock};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogProduct, FetchError, HttpInventoryClient, InventoryClient, ProductId,
        StaticInventory, Stock,
    };
}
