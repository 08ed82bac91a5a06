//! Checkout event handlers.
//!
//! Checkout is two steps inside the cart modal: the checkout button swaps the
//! modal body for the customer form, and confirming the form places the
//! order, empties the cart and shows the confirmation panel.

use askama::Template;
use chrono::{DateTime, TimeZone};
use tienda_core::{CheckoutError, CustomerInfo, KeyValueStore, OrderId, Update};
use tracing::instrument;

use super::{cart, fragment};
use crate::bindings;
use crate::error::Result;
use crate::state::{AppState, CartModal};

/// Customer form with the order summary.
#[derive(Template)]
#[template(path = "partials/checkout_form.html")]
pub struct CheckoutFormTemplate {
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

/// Confirmation panel shown after an order is placed.
#[derive(Template)]
#[template(path = "partials/order_confirmation.html")]
pub struct OrderConfirmationTemplate<'a> {
    pub customer_name: &'a str,
    pub order_id: OrderId,
}

/// Show the customer form.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] when there is nothing to buy, or a
/// render error.
#[instrument(skip(state))]
pub fn begin<S: KeyValueStore>(state: &mut AppState<S>) -> Result<Update> {
    let cart = state.repo().cart();
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart.into());
    }

    let totals = state.config().shipping.quote(cart);
    let form = CheckoutFormTemplate {
        subtotal: totals.subtotal.to_string(),
        shipping: totals.shipping_label(),
        total: totals.total.to_string(),
    };
    let body = fragment(bindings::CART_BODY, &form)?;
    state.set_modal(CartModal::Checkout);

    Ok(Update::new().with_fragment(body))
}

/// Place the order for the current cart.
///
/// Appends an order holding a snapshot of the cart, saves the order log,
/// then empties and saves the cart. If the order log cannot be saved the
/// order is taken back out and the cart is left as it was.
///
/// # Errors
///
/// Returns [`CheckoutError::MissingField`] for a blank form field,
/// [`CheckoutError::EmptyCart`] for an empty cart, or a storage or render
/// error.
#[instrument(skip(state, customer, now), fields(customer = %customer.name))]
pub fn confirm<S: KeyValueStore, Tz: TimeZone>(
    state: &mut AppState<S>,
    customer: CustomerInfo,
    now: &DateTime<Tz>,
) -> Result<Update> {
    let policy = state.config().shipping;
    let repo = state.repo_mut();

    let (cart, orders) = repo.cart_and_orders_mut();
    let totals = policy.quote(cart);
    let order = orders.place(cart.snapshot(), customer, totals, now)?;
    if let Err(err) = repo.save_orders() {
        if repo.orders_mut().delete(order.id).is_err() {
            tracing::warn!(order_id = %order.id, "Unsaved order already gone");
        }
        return Err(err.into());
    }

    repo.cart_mut().clear();
    repo.save_cart()?;
    state.set_modal(CartModal::Confirmation(order.id));

    tracing::info!(
        order_id = %order.id,
        items = order.item_count(),
        total = %order.total,
        "Order confirmed"
    );

    let confirmation = OrderConfirmationTemplate {
        customer_name: &order.customer.name,
        order_id: order.id,
    };
    Ok(cart::render(state)?.with_fragment(fragment(bindings::CART_BODY, &confirmation)?))
}
