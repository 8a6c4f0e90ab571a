//! Line items, catalog products, and stock records.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// Extra catalog attributes carried through untouched.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Keys a [`LineItem`] writes itself; never kept in `extra`.
const LINE_ITEM_KEYS: [&str; 5] = ["id", "title", "price", "image", "amount"];

/// A product as returned by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    /// Any other fields the catalog returns.
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Available quantity of a product, read from `GET /stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: ProductId,
    pub amount: u32,
}

impl StockRecord {
    pub fn new(id: ProductId, amount: u32) -> Self {
        Self { id, amount }
    }

    /// Whether `quantity` units can be held in a cart.
    pub fn covers(&self, quantity: u32) -> bool {
        quantity <= self.amount
    }
}

/// One product in the cart together with its quantity.
///
/// Display attributes are opaque to the cart logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    #[serde(flatten)]
    pub extra: Attributes,
    pub amount: u32,
}

impl LineItem {
    /// A fresh line item for `product` with quantity 1.
    ///
    /// Catalog attributes named like a line item field are dropped, so the
    /// cart's own quantity wins over e.g. a catalog `amount`.
    pub fn from_product(product: Product) -> Self {
        let mut extra = product.extra;
        for key in LINE_ITEM_KEYS {
            extra.remove(key);
        }

        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            extra,
            amount: 1,
        }
    }

    /// Copy of this item with a different quantity.
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    /// `price * amount`.
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}
