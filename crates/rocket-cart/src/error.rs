//! Cart error types.

use rocket_inventory::{FetchError, ProductId};
use rocket_storage::StorageError;
use thiserror::Error;

use crate::notice::Notice;

/// Errors that can occur in cart operations.
///
/// None of these reach callers of [`CartStore`](crate::CartStore); they are
/// turned into a [`Notice`] at the operation boundary.
#[derive(Error, Debug)]
pub enum CartError {
    /// Not enough stock for the requested quantity.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotFound(ProductId),

    /// Amount update for a line that does not exist.
    #[error("No cart line to update for product {0}")]
    MissingLine(ProductId),

    /// A second line with an id already in the cart.
    #[error("Duplicate cart line for product {0}")]
    DuplicateLine(ProductId),

    /// Invalid amount.
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in cart amount")]
    Overflow,

    /// Inventory query failed.
    #[error("Inventory query failed: {0}")]
    Fetch(#[from] FetchError),

    /// Storage read or write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// The mutation a [`CartError`] interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    Update,
}

impl CartOperation {
    /// Notice shown when this operation fails for a reason other than stock.
    pub fn failure_notice(&self) -> Notice {
        match self {
            CartOperation::Add => Notice::AddProductFailed,
            CartOperation::Remove => Notice::RemoveProductFailed,
            CartOperation::Update => Notice::UpdateFailed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CartOperation::Add => "add_product",
            CartOperation::Remove => "remove_product",
            CartOperation::Update => "update_product_amount",
        }
    }
}

impl CartError {
    /// The user-facing notice for this error raised during `op`.
    pub fn notice(&self, op: CartOperation) -> Notice {
        match self {
            CartError::OutOfStock { .. } => Notice::OutOfStock,
            _ => op.failure_notice(),
        }
    }
}
