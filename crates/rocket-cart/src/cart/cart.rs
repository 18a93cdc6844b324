//! Cart and product line types.

use crate::error::CartError;
use rocket_inventory::{CatalogProduct, ProductId, Stock};
use serde::{Deserialize, Deserializer, Serialize};

/// One line in the cart: catalog metadata plus the quantity held.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price as reported by the catalog.
    pub price: f64,
    /// Product image.
    pub image_url: String,
    /// Quantity in the cart. Always at least 1.
    pub amount: i64,
}

impl Product {
    /// Create a cart line from catalog metadata.
    pub fn from_catalog(product: CatalogProduct, amount: i64) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image_url: product.image_url,
            amount,
        }
    }
}

/// A shopping cart.
///
/// Lines are unique by id and keep insertion order. Serialized as a bare
/// JSON array of [`Product`]; deserializing goes through
/// [`Cart::from_persisted`].
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Vec::<Product>::deserialize(deserializer)?;
        Ok(Self::from_persisted(items).0)
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from a persisted record.
    ///
    /// Lines with `amount < 1` are dropped and repeated ids are merged by
    /// summing their amounts into the first occurrence. Returns the cart and
    /// whether anything had to be repaired.
    pub fn from_persisted(items: Vec<Product>) -> (Self, bool) {
        let mut cart = Self::new();
        let mut repaired = false;

        for item in items {
            if item.amount < 1 {
                repaired = true;
                continue;
            }
            match cart.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => {
                    existing.amount = existing.amount.saturating_add(item.amount);
                    repaired = true;
                }
                None => cart.items.push(item),
            }
        }

        (cart, repaired)
    }

    /// Append a new line.
    ///
    /// Returns an error if:
    /// - The amount is not positive
    /// - A line with the same id already exists
    pub fn add_line(&mut self, product: Product) -> Result<(), CartError> {
        if product.amount < 1 {
            return Err(CartError::InvalidAmount(product.amount));
        }
        if self.contains(product.id) {
            return Err(CartError::DuplicateLine(product.id));
        }
        self.items.push(product);
        Ok(())
    }

    /// Add one unit to an existing line, bounded by `stock`.
    ///
    /// Returns the new amount.
    pub fn increment(&mut self, id: ProductId, stock: &Stock) -> Result<i64, CartError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CartError::ItemNotFound(id))?;

        let requested = item.amount.checked_add(1).ok_or(CartError::Overflow)?;
        if !stock.can_fulfill(requested) {
            return Err(CartError::OutOfStock {
                product_id: id,
                requested,
                available: stock.amount,
            });
        }

        item.amount = requested;
        Ok(requested)
    }

    /// Replace the amount of an existing line.
    pub fn set_amount(&mut self, id: ProductId, amount: i64) -> Result<(), CartError> {
        if amount < 1 {
            return Err(CartError::InvalidAmount(amount));
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CartError::MissingLine(id))?;
        item.amount = amount;
        Ok(())
    }

    /// Remove a line, keeping the order of the others.
    pub fn remove(&mut self, id: ProductId) -> Result<Product, CartError> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(CartError::ItemNotFound(id))?;
        Ok(self.items.remove(index))
    }

    /// Get a line by product id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines, saturating at `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.amount))
    }

    /// Lines in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }

    pub fn into_products(self) -> Vec<Product> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, amount: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {}", id),
            price: 99.9,
            image_url: format!("https://img.example/{}.jpg", id),
            amount,
        }
    }

    fn ids(cart: &Cart) -> Vec<i64> {
        cart.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_line() {
        let mut cart = Cart::new();
        cart.add_line(product(1, 1)).unwrap();
        cart.add_line(product(2, 1)).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(ids(&cart), vec![1, 2]);
    }

    #[test]
    fn test_add_duplicate_line_rejected() {
        let mut cart = Cart::new();
        cart.add_line(product(1, 1)).unwrap();
        let err = cart.add_line(product(1, 1)).unwrap_err();
        assert!(matches!(err, CartError::DuplicateLine(id) if id == ProductId::new(1)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_line_invalid_amount() {
        let mut cart = Cart::new();
        assert!(cart.add_line(product(1, 0)).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_within_stock() {
        let mut cart = Cart::new();
        cart.add_line(product(1, 1)).unwrap();
        cart.add_line(product(2, 1)).unwrap();

        let amount = cart
            .increment(ProductId::new(1), &Stock::new(ProductId::new(1), 5))
            .unwrap();

        assert_eq!(amount, 2);
        assert_eq!(cart.get(ProductId::new(2)).unwrap().amount, 1);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_increment_past_stock() {
        let mut cart = Cart::new();
        cart.add_line(product(1, 2)).unwrap();

        let err = cart
            .increment(ProductId::new(1), &Stock::new(ProductId::new(1), 2))
            .unwrap_err();

        assert!(matches!(
            err,
            CartError::OutOfStock { requested: 3, available: 2, .. }
        ));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 2);
    }

    #[test]
    fn test_set_amount() {
        let mut cart = Cart::new();
        cart.add_line(product(1, 1)).unwrap();
        cart.set_amount(ProductId::new(1), 4).unwrap();
        assert_eq!(cart.item_count(), 4);

        assert!(matches!(
            cart.set_amount(ProductId::new(9), 1),
            Err(CartError::MissingLine(_))
        ));
        assert!(matches!(
            cart.set_amount(ProductId::new(1), 0),
            Err(CartError::InvalidAmount(0))
        ));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut cart = Cart::new();
        for id in 1..=4 {
            cart.add_line(product(id, 1)).unwrap();
        }

        let removed = cart.remove(ProductId::new(2)).unwrap();
        assert_eq!(removed.id, ProductId::new(2));
        assert_eq!(ids(&cart), vec![1, 3, 4]);

        assert!(matches!(
            cart.remove(ProductId::new(2)),
            Err(CartError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_serializes_as_array() {
        let mut cart = Cart::new();
        cart.add_line(product(1, 2)).unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["imageUrl"], "https://img.example/1.jpg");
        assert_eq!(json[0]["amount"], 2);
    }

    #[test]
    fn test_from_persisted_repairs() {
        let (cart, repaired) =
            Cart::from_persisted(vec![product(1, 1), product(2, 0), product(1, 2), product(3, 1)]);

        assert!(repaired);
        assert_eq!(ids(&cart), vec![1, 3]);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 3);
    }

    #[test]
    fn test_item_count_saturates() {
        let (cart, repaired) =
            Cart::from_persisted(vec![product(1, i64::MAX), product(2, 1)]);

        assert!(!repaired);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), i64::MAX);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let json = r#"[
            {"id": 1, "title": "A", "price": 1.0, "imageUrl": "a", "amount": 1},
            {"id": 2, "title": "B", "price": 2.0, "imageUrl": "b", "amount": 0},
            {"id": 1, "title": "A", "price": 1.0, "imageUrl": "a", "amount": 4}
        ]"#;

        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(ids(&cart), vec![1]);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 5);
    }

    #[test]
    fn test_from_persisted_clean() {
        let (cart, repaired) = Cart::from_persisted(vec![product(1, 1), product(2, 5)]);
        assert!(!repaired);
        assert_eq!(cart.item_count(), 6);
    }
}
