//! Shopping cart state for the Rocket storefront.
//!
//! This crate provides:
//!
//! - **Cart**: ordered product lines, unique by id, each with `amount >= 1`
//! - **CartStore**: the single shared cart, validated against inventory and
//!   written through to durable storage on every change
//! - **Notices**: user-facing messages emitted when an operation fails
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_cart::prelude::*;
//! use rocket_inventory::HttpInventoryClient;
//! use rocket_storage::FileStorage;
//!
//! let store = CartStore::builder(
//!     FileStorage::open(".cart")?,
//!     HttpInventoryClient::new("http://localhost:3333"),
//! )
//! .with_namespace("@RocketShoes")
//! .open()?;
//!
//! store.add_product(ProductId::new(1)).await;
//! store
//!     .update_product_amount(UpdateProductAmount {
//!         product_id: ProductId::new(1),
//!         amount: 3,
//!     })
//!     .await;
//!
//! for line in store.cart().iter() {
//!     println!("{} x{}", line.title, line.amount);
//! }
//! ```

pub mod cart;
pub mod error;
pub mod notice;
pub mod store;

pub use cart::{Cart, Product};
pub use error::{CartError, CartOperation};
pub use notice::{ChannelNotifier, Notice, Notifier, TracingNotifier};
pub use rocket_inventory::ProductId;
pub use store::{CartStore, CartStoreBuilder, StoreConfig, UpdateProductAmount, DEFAULT_NAMESPACE};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, Product};
    pub use crate::error::CartError;
    pub use crate::notice::{Notice, Notifier};
    pub use crate::store::{CartStore, StoreConfig, UpdateProductAmount};
    pub use rocket_inventory::ProductId;
}
