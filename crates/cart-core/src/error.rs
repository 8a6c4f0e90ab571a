//! Cart error types.

use std::fmt;

use cart_fetch::FetchError;
use cart_kv::CacheError;
use thiserror::Error;

use crate::ids::ProductId;
use crate::notice::Notice;

/// The mutating operation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOp {
    Add,
    Remove,
    Update,
}

impl fmt::Display for CartOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartOp::Add => write!(f, "add"),
            CartOp::Remove => write!(f, "remove"),
            CartOp::Update => write!(f, "update"),
        }
    }
}

/// Failures talking to the inventory/catalog service.
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("inventory unavailable: {0}")]
    Unavailable(String),
}

/// Why a cart operation left the cart unchanged.
///
/// Every variant is recoverable: the cart and its persisted copy are exactly
/// what they were before the call.
#[derive(Error, Debug)]
pub enum CartError {
    /// The requested quantity is above the available stock.
    #[error("requested {requested} of product {product_id}, only {available} in stock")]
    InsufficientStock {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// The product is not in the cart.
    #[error("{op} failed: product {product_id} is not in the cart")]
    NotInCart { op: CartOp, product_id: ProductId },

    /// A stock or catalog lookup failed.
    #[error("{op} failed: inventory lookup for product {product_id}: {source}")]
    Inventory {
        op: CartOp,
        product_id: ProductId,
        #[source]
        source: InventoryError,
    },

    /// The new cart could not be written to storage.
    #[error("{op} failed: could not persist cart: {source}")]
    Storage {
        op: CartOp,
        #[source]
        source: CacheError,
    },
}

impl CartError {
    /// The operation that failed, if the error is tied to one.
    pub fn op(&self) -> Option<CartOp> {
        match self {
            CartError::InsufficientStock { .. } => None,
            CartError::NotInCart { op, .. }
            | CartError::Inventory { op, .. }
            | CartError::Storage { op, .. } => Some(*op),
        }
    }

    /// The user-facing notice for this error.
    pub fn notice(&self) -> Notice {
        match self.op() {
            None => Notice::InsufficientStock,
            Some(op) => Notice::failure(op),
        }
    }

    pub fn is_insufficient_stock(&self) -> bool {
        matches!(self, CartError::InsufficientStock { .. })
    }
}
