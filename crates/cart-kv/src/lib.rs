//! Key-value persistence for cart state.
//!
//! A [`KvStore`] holds raw string values under string keys, the way browser
//! local storage does. [`Cache`] layers typed JSON access on top of any store.
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_kv::{Cache, FileStore};
//!
//! let cache = Cache::new(FileStore::open(".cart/storage.json")?);
//!
//! cache.set("@RocketShoes:cart", &items)?;
//! let items: Option<Vec<LineItem>> = cache.get("@RocketShoes:cart")?;
//! ```

mod cache;
mod error;
mod file;
mod store;

pub use cache::Cache;
pub use error::CacheError;
pub use file::FileStore;
pub use store::{KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
