//! Shopping cart module.
//!
//! Contains the cart value type and its product lines.

#[allow(clippy::module_inception)]
mod cart;

pub use cart::{Cart, Product};
