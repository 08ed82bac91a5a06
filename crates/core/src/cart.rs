//! The shopping cart.
//!
//! An ordered list of lines keyed by product id. Lines are merged on add and
//! dropped once their quantity would reach zero, so every line always has a
//! quantity of at least one.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Errors from cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    /// No line with this product id is in the cart.
    #[error("product {0} is not in the cart")]
    ItemNotFound(ProductId),
}

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartItem {
    /// Create a line with a quantity of one.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
            quantity: 1,
        }
    }

    /// Price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// The in-progress, unconfirmed list of selected products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a product.
    ///
    /// If a line with the same id exists its quantity is incremented by one
    /// and the incoming item is discarded; otherwise the item is appended.
    /// Returns the quantity of the affected line.
    pub fn add(&mut self, item: CartItem) -> u32 {
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }
        let quantity = item.quantity.max(1);
        self.items.push(CartItem { quantity, ..item });
        quantity
    }

    /// Increment a line's quantity by one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no line has this id.
    pub fn increase(&mut self, id: &ProductId) -> Result<u32, CartError> {
        let line = self.line_mut(id)?;
        line.quantity = line.quantity.saturating_add(1);
        Ok(line.quantity)
    }

    /// Decrement a line's quantity by one, removing it at zero.
    ///
    /// Returns the remaining quantity (zero when the line was removed).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no line has this id.
    pub fn decrease(&mut self, id: &ProductId) -> Result<u32, CartError> {
        let line = self.line_mut(id)?;
        if line.quantity > 1 {
            line.quantity -= 1;
            return Ok(line.quantity);
        }
        self.items.retain(|line| &line.id != id);
        Ok(0)
    }

    /// Remove a line regardless of its quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no line has this id.
    pub fn remove(&mut self, id: &ProductId) -> Result<CartItem, CartError> {
        let index = self
            .items
            .iter()
            .position(|line| &line.id == id)
            .ok_or_else(|| CartError::ItemNotFound(id.clone()))?;
        Ok(self.items.remove(index))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Independent copy of the lines, for attaching to an order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities (the number on the cart badge).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    fn line_mut(&mut self, id: &ProductId) -> Result<&mut CartItem, CartError> {
        self.items
            .iter_mut()
            .find(|line| &line.id == id)
            .ok_or_else(|| CartError::ItemNotFound(id.clone()))
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self { items }
    }
}
