//! The cart value.
//!
//! A [`Cart`] is never edited in place: every change produces a new value,
//! so a failed operation can simply drop the candidate and keep the old one.

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::ids::ProductId;
use crate::item::{LineItem, Product};

/// Reasons a list of line items is not a valid cart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartDataError {
    #[error("product {0} appears more than once")]
    DuplicateItem(ProductId),

    #[error("product {0} has quantity 0")]
    ZeroAmount(ProductId),
}

/// An ordered collection of line items, at most one per product, each with
/// a quantity of at least 1.
///
/// Serialized as a bare JSON array of line items.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart, checking uniqueness and quantities.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartDataError> {
        for (index, item) in items.iter().enumerate() {
            if item.amount == 0 {
                return Err(CartDataError::ZeroAmount(item.id));
            }
            if items[..index].iter().any(|other| other.id == item.id) {
                return Err(CartDataError::DuplicateItem(item.id));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Quantity of `id` in the cart, 0 when absent.
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.amount)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// A new cart holding `product` with quantity 1. An entry for the same
    /// product is replaced in place; otherwise the item is appended.
    pub fn with_product(&self, product: Product) -> Self {
        let item = LineItem::from_product(product);
        let mut items = self.items.clone();
        match self.position(item.id) {
            Some(position) => items[position] = item,
            None => items.push(item),
        }
        Self { items }
    }

    /// A new cart where `id` has quantity `amount`, in the same position.
    ///
    /// An amount of 0 drops the item. Returns `None` when `id` is absent.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Option<Self> {
        if amount == 0 {
            return self.without(id);
        }
        let position = self.position(id)?;
        let mut items = self.items.clone();
        items[position] = items[position].with_amount(amount);
        Some(Self { items })
    }

    /// A new cart without `id`. Returns `None` when `id` is absent.
    pub fn without(&self, id: ProductId) -> Option<Self> {
        let position = self.position(id)?;
        let mut items = self.items.clone();
        items.remove(position);
        Some(Self { items })
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartDataError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Attributes;

    fn item(id: u64, amount: u32) -> LineItem {
        LineItem {
            id: ProductId::new(id),
            title: format!("Product {}", id),
            price: 10.0,
            image: format!("https://img.example.com/{}.jpg", id),
            extra: Attributes::new(),
            amount,
        }
    }

    fn product(id: u64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {}", id),
            price: 10.0,
            image: format!("https://img.example.com/{}.jpg", id),
            extra: Attributes::new(),
        }
    }

    fn cart(items: &[(u64, u32)]) -> Cart {
        Cart::from_items(items.iter().map(|&(id, amount)| item(id, amount)).collect()).unwrap()
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(ProductId::new(1)), 0);
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn test_from_items_rejects_duplicates_and_zero() {
        assert_eq!(
            Cart::from_items(vec![item(1, 1), item(1, 2)]),
            Err(CartDataError::DuplicateItem(ProductId::new(1)))
        );
        assert_eq!(
            Cart::from_items(vec![item(1, 1), item(2, 0)]),
            Err(CartDataError::ZeroAmount(ProductId::new(2)))
        );
    }

    #[test]
    fn test_with_product_leaves_source_cart_untouched() {
        let before = cart(&[(1, 1)]);
        let after = before.with_product(product(2));

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert_eq!(after.items()[1].id, ProductId::new(2));
    }

    #[test]
    fn test_with_product_replaces_existing_entry() {
        let before = cart(&[(1, 3), (2, 1)]);
        let after = before.with_product(product(1));

        assert_eq!(after.len(), 2);
        assert_eq!(after.items()[0].id, ProductId::new(1));
        assert_eq!(after.items()[0].amount, 1);
    }

    #[test]
    fn test_with_amount_keeps_order() {
        let before = cart(&[(1, 1), (2, 1), (3, 4)]);
        let after = before.with_amount(ProductId::new(2), 5).unwrap();

        let ids: Vec<u64> = after.items().iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(after.quantity_of(ProductId::new(2)), 5);
        assert_eq!(before.quantity_of(ProductId::new(2)), 1);
        assert_eq!(after.item_count(), 10);
    }

    #[test]
    fn test_with_amount_zero_drops_item() {
        let after = cart(&[(1, 2), (2, 1)]).with_amount(ProductId::new(1), 0).unwrap();
        assert!(after.get(ProductId::new(1)).is_none());
        assert_eq!(after.len(), 1);
    }

    #[test]
    fn test_absent_id_yields_none() {
        let cart = cart(&[(1, 1)]);
        assert!(cart.with_amount(ProductId::new(9), 2).is_none());
        assert!(cart.without(ProductId::new(9)).is_none());
    }

    #[test]
    fn test_without_keeps_others() {
        let after = cart(&[(1, 1), (2, 3), (3, 2)]).without(ProductId::new(2)).unwrap();
        assert_eq!(after, cart(&[(1, 1), (3, 2)]));
    }

    #[test]
    fn test_serializes_as_array() {
        let cart = cart(&[(1, 2)]);
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["amount"], 2);

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_deserialize_rejects_invalid_cart() {
        let raw = r#"[
            {"id":1,"title":"A","price":1.0,"image":"","amount":1},
            {"id":1,"title":"A","price":1.0,"image":"","amount":1}
        ]"#;
        assert!(serde_json::from_str::<Cart>(raw).is_err());
    }

    #[test]
    fn test_total() {
        let cart = cart(&[(1, 2), (2, 3)]);
        assert_eq!(cart.total(), 50.0);
    }
}
