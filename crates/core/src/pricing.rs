//! Subtotal, shipping and total computation.

use crate::cart::Cart;
use crate::types::Price;

/// Flat-rate shipping that becomes free above a subtotal threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Charged when the subtotal does not exceed `free_threshold`.
    pub flat_rate: Price,
    /// Subtotals strictly greater than this ship for free.
    pub free_threshold: Price,
}

impl ShippingPolicy {
    pub const DEFAULT_FLAT_RATE: i64 = 150;
    pub const DEFAULT_FREE_THRESHOLD: i64 = 2000;

    #[must_use]
    pub const fn new(flat_rate: Price, free_threshold: Price) -> Self {
        Self {
            flat_rate,
            free_threshold,
        }
    }

    /// Shipping charged for a given subtotal.
    #[must_use]
    pub fn shipping_for(&self, subtotal: Price) -> Price {
        if subtotal > self.free_threshold {
            Price::ZERO
        } else {
            self.flat_rate
        }
    }

    /// Totals for the current cart contents.
    #[must_use]
    pub fn quote(&self, cart: &Cart) -> Totals {
        Totals::new(cart.subtotal(), self)
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::new(
            Price::from_units(Self::DEFAULT_FLAT_RATE),
            Price::from_units(Self::DEFAULT_FREE_THRESHOLD),
        )
    }
}

/// Subtotal, shipping and total of a cart or order.
///
/// `total` is always `subtotal + shipping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

impl Totals {
    #[must_use]
    pub fn new(subtotal: Price, policy: &ShippingPolicy) -> Self {
        let shipping = policy.shipping_for(subtotal);
        Self {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    /// Shipping as shown in the cart summary: `Gratis` when free.
    #[must_use]
    pub fn shipping_label(&self) -> String {
        if self.shipping.is_zero() {
            "Gratis".to_string()
        } else {
            self.shipping.to_string()
        }
    }
}
