//! The cart store: current cart, stock validation, persistence, listeners.

use cart_kv::Cache;

use crate::cart::Cart;
use crate::error::{CartError, CartOp};
use crate::ids::ProductId;
use crate::inventory::Inventory;

/// Storage key the cart is read from and written to unless configured.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

type Listener = Box<dyn Fn(&Cart) + Send + Sync>;

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the session's cart.
///
/// Every mutation validates against the inventory, builds a new [`Cart`],
/// writes it to storage, and only then makes it current and calls the
/// listeners. A rejected or failed call leaves both the in-memory cart and
/// the stored copy untouched.
pub struct CartStore<I> {
    inventory: I,
    cache: Cache,
    key: String,
    cart: Cart,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<I: Inventory> CartStore<I> {
    /// Open the store, restoring the cart saved under `key`.
    ///
    /// A missing or unreadable entry yields an empty cart.
    pub fn open(inventory: I, cache: Cache, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = match cache.get::<Cart>(&key) {
            Ok(Some(cart)) => {
                tracing::debug!(key = %key, items = cart.len(), "restored cart");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "stored cart unreadable, starting empty");
                Cart::new()
            }
        };

        Self {
            inventory,
            cache,
            key,
            cart,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Open the store under [`DEFAULT_STORAGE_KEY`].
    pub fn open_default(inventory: I, cache: Cache) -> Self {
        Self::open(inventory, cache, DEFAULT_STORAGE_KEY)
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    /// Call `listener` with the new cart after every committed change.
    pub fn subscribe(&mut self, listener: impl Fn(&Cart) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() < before
    }

    /// Add one unit of `product_id`.
    ///
    /// A product already in the cart gets its quantity bumped; a new one is
    /// looked up in the catalog and appended with quantity 1.
    pub async fn add(&mut self, product_id: ProductId) -> Result<bool, CartError> {
        let current = self.cart.quantity_of(product_id);
        let stock = self
            .inventory
            .stock(product_id)
            .await
            .map_err(|source| CartError::Inventory {
                op: CartOp::Add,
                product_id,
                source,
            })?;

        let requested = current
            .checked_add(1)
            .filter(|&quantity| stock.covers(quantity))
            .ok_or(CartError::InsufficientStock {
                product_id,
                requested: u64::from(current) + 1,
                available: stock.amount,
            })?;

        let next = match self.cart.with_amount(product_id, requested) {
            Some(next) => next,
            None => {
                let product = self
                    .inventory
                    .product(product_id)
                    .await
                    .map_err(|source| CartError::Inventory {
                        op: CartOp::Add,
                        product_id,
                        source,
                    })?;
                self.cart.with_product(product)
            }
        };

        self.commit(CartOp::Add, next)?;
        Ok(true)
    }

    /// Remove `product_id` from the cart entirely.
    pub fn remove(&mut self, product_id: ProductId) -> Result<bool, CartError> {
        let next = self
            .cart
            .without(product_id)
            .ok_or(CartError::NotInCart {
                op: CartOp::Remove,
                product_id,
            })?;

        self.commit(CartOp::Remove, next)?;
        Ok(true)
    }

    /// Set the quantity of `product_id` to exactly `amount`.
    ///
    /// An `amount` of zero or less does nothing and returns `Ok(false)`.
    pub async fn update_amount(
        &mut self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<bool, CartError> {
        if amount <= 0 {
            tracing::debug!(product_id = %product_id, amount, "ignoring non-positive amount");
            return Ok(false);
        }

        let stock = self
            .inventory
            .stock(product_id)
            .await
            .map_err(|source| CartError::Inventory {
                op: CartOp::Update,
                product_id,
                source,
            })?;

        let amount = u32::try_from(amount)
            .ok()
            .filter(|&quantity| stock.covers(quantity))
            .ok_or(CartError::InsufficientStock {
                product_id,
                requested: amount.unsigned_abs(),
                available: stock.amount,
            })?;

        let next = self
            .cart
            .with_amount(product_id, amount)
            .ok_or(CartError::NotInCart {
                op: CartOp::Update,
                product_id,
            })?;

        self.commit(CartOp::Update, next)?;
        Ok(true)
    }

    fn commit(&mut self, op: CartOp, next: Cart) -> Result<(), CartError> {
        self.cache
            .set(&self.key, &next)
            .map_err(|source| CartError::Storage { op, source })?;

        self.cart = next;
        tracing::info!(
            op = %op,
            products = self.cart.len(),
            units = self.cart.item_count(),
            "cart updated"
        );

        for (_, listener) in &self.listeners {
            listener(&self.cart);
        }
        Ok(())
    }
}

impl<I> std::fmt::Debug for CartStore<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
