//! Shopping cart state for a storefront.
//!
//! This crate keeps a session's cart in sync with two collaborators:
//!
//! - **Inventory**: stock levels and catalog details behind `GET /stock/{id}`
//!   and `GET /products/{id}`
//! - **Storage**: a key-value store holding the cart as one JSON array
//!
//! [`CartStore`] is the entry point. Its three operations validate against
//! stock, build a new [`Cart`] value, persist it, and only then make it current.
//! Rejections come back as [`CartError`]; map them to a [`Notice`] to show
//! the user.
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_core::prelude::*;
//! use cart_fetch::FetchClient;
//! use cart_kv::{Cache, FileStore};
//!
//! let inventory = HttpInventory::new(FetchClient::new().with_base_url("http://localhost:3333"));
//! let cache = Cache::new(FileStore::open(".cart/storage.json")?);
//! let mut store = CartStore::open_default(inventory, cache);
//!
//! store.add(ProductId::new(1)).await?;
//! store.update_amount(ProductId::new(1), 3).await?;
//! println!("{} items, total {:.2}", store.cart().item_count(), store.cart().total());
//! ```

pub mod cart;
pub mod error;
pub mod ids;
pub mod inventory;
pub mod item;
pub mod notice;
pub mod store;

pub use cart::{Cart, CartDataError};
pub use error::{CartError, CartOp, InventoryError};
pub use ids::ProductId;
pub use inventory::{HttpInventory, Inventory};
pub use item::{LineItem, Product, StockRecord};
pub use notice::{report, Notice, NoticeSink};
pub use store::{CartStore, SubscriptionId, DEFAULT_STORAGE_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::Cart;
    pub use crate::error::{CartError, CartOp};
    pub use crate::ids::ProductId;
    pub use crate::inventory::{HttpInventory, Inventory};
    pub use crate::item::{LineItem, Product, StockRecord};
    pub use crate::notice::{report, Notice, NoticeSink};
    pub use crate::store::{CartStore, DEFAULT_STORAGE_KEY};
}
