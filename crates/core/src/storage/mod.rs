//! Key-value persistence for the cart and the order log.
//!
//! # Keys
//!
//! - `cart` - JSON array of cart lines
//! - `orders` - JSON array of confirmed orders
//!
//! Both values are read once when a [`Repository`] is loaded and rewritten in
//! full after every mutation. A missing key loads as an empty list; a value
//! that is not valid JSON for its type is returned as
//! [`StorageError::Malformed`] and never repaired.

#[cfg(feature = "fs")]
mod file;
mod memory;

#[cfg(feature = "fs")]
pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cart::Cart;
use crate::order::OrderLog;

/// Storage key of the cart.
pub const CART_KEY: &str = "cart";
/// Storage key of the order log.
pub const ORDERS_KEY: &str = "orders";

/// Errors from reading or writing persisted state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing medium failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A stored value could not be decoded.
    #[error("malformed value under key {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key-value storage, the equivalent of the browser's local storage.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing medium fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing medium fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory cart and order log mirrored to a [`KeyValueStore`].
///
/// The repository is the single source of truth while a page is open; the
/// store is the source of truth across reloads.
#[derive(Debug)]
pub struct Repository<S> {
    store: S,
    cart: Cart,
    orders: OrderLog,
}

impl<S: KeyValueStore> Repository<S> {
    /// Load both lists from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Malformed`] if a stored value does not decode
    /// and [`StorageError::Io`] if the store cannot be read.
    pub fn load(store: S) -> Result<Self, StorageError> {
        let cart = read_json::<Cart>(&store, CART_KEY)?.unwrap_or_default();
        let orders = read_json::<OrderLog>(&store, ORDERS_KEY)?.unwrap_or_default();
        tracing::debug!(
            cart_lines = cart.items().len(),
            orders = orders.len(),
            "Loaded stored state"
        );
        Ok(Self {
            store,
            cart,
            orders,
        })
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable cart access. Call [`Self::save_cart`] afterwards.
    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    #[must_use]
    pub const fn orders(&self) -> &OrderLog {
        &self.orders
    }

    /// Mutable order log access. Call [`Self::save_orders`] afterwards.
    pub const fn orders_mut(&mut self) -> &mut OrderLog {
        &mut self.orders
    }

    /// Split borrow for operations that read the cart while appending an order.
    pub const fn cart_and_orders_mut(&mut self) -> (&mut Cart, &mut OrderLog) {
        (&mut self.cart, &mut self.orders)
    }

    /// Write the cart under [`CART_KEY`].
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if encoding or writing fails.
    pub fn save_cart(&mut self) -> Result<(), StorageError> {
        write_json(&mut self.store, CART_KEY, &self.cart)
    }

    /// Write the order log under [`ORDERS_KEY`].
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if encoding or writing fails.
    pub fn save_orders(&mut self) -> Result<(), StorageError> {
        write_json(&mut self.store, ORDERS_KEY, &self.orders)
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }
}

fn read_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            key: key.to_string(),
            source,
        })
}

fn write_json<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
