//! Storefront event handlers.
//!
//! # Event Structure
//!
//! ```text
//! DOMContentLoaded              - Load: badge, cart lines, summary, contact info
//!
//! # Cart
//! click #cart-icon              - Open cart modal
//! click #close-modal            - Close cart modal
//! click window (overlay)        - Close cart modal when the overlay is the target
//! click .add-to-cart            - Add product (data-id, data-name, data-price, data-image)
//! click .quantity-btn.plus      - Increase line quantity (data-id)
//! click .quantity-btn.minus     - Decrease line quantity, removing at zero (data-id)
//! click .remove-item            - Remove line (data-id)
//!
//! # Checkout
//! click #checkout-btn           - Show customer form (blocked on empty cart)
//! click #confirm-order          - Place order (blocked on blank field)
//! click #close-after-checkout   - Close cart modal
//! ```

pub mod cart;
pub mod checkout;
pub mod contact;

use std::collections::HashMap;
use std::fmt::Display;

use askama::Template;
use chrono::Local;
use tienda_core::{CustomerField, CustomerInfo, Fragment, KeyValueStore, ProductId, Update};

use crate::bindings;
use crate::error::Result;
use crate::state::AppState;
use cart::ProductData;

/// A storefront event, after the element binding has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Load,
    AddToCart(ProductData),
    IncreaseQuantity(ProductId),
    DecreaseQuantity(ProductId),
    RemoveItem(ProductId),
    OpenCart,
    CloseCart,
    WindowClick { target: String },
    Checkout,
    ConfirmOrder(CustomerInfo),
}

impl Event {
    /// Resolve a click on a bound element.
    ///
    /// `element` is the element id, or the class list for class-bound
    /// controls. `data` holds the element's `data-*` attributes (without the
    /// prefix) or, for `confirm-order`, the checkout input values keyed by
    /// input id. Returns `None` for unbound elements or missing product data.
    #[must_use]
    pub fn from_click(element: &str, data: &HashMap<String, String>) -> Option<Self> {
        let data_id = || data.get("id").map(|id| ProductId::new(id.as_str()));
        match element {
            bindings::CART_ICON => Some(Self::OpenCart),
            bindings::CLOSE_MODAL | bindings::CLOSE_AFTER_CHECKOUT => Some(Self::CloseCart),
            bindings::CHECKOUT_BTN => Some(Self::Checkout),
            bindings::CONFIRM_ORDER => Some(Self::ConfirmOrder(customer_from_inputs(data))),
            bindings::ADD_TO_CART_CLASS => Some(Self::AddToCart(ProductData {
                id: data.get("id")?.clone(),
                name: data.get("name")?.clone(),
                price: data.get("price")?.clone(),
                image: data.get("image")?.clone(),
            })),
            bindings::QUANTITY_PLUS_CLASS => data_id().map(Self::IncreaseQuantity),
            bindings::QUANTITY_MINUS_CLASS => data_id().map(Self::DecreaseQuantity),
            bindings::REMOVE_ITEM_CLASS => data_id().map(Self::RemoveItem),
            _ => None,
        }
    }
}

fn customer_from_inputs(inputs: &HashMap<String, String>) -> CustomerInfo {
    let value = |field: CustomerField| inputs.get(field.input_id()).cloned().unwrap_or_default();
    CustomerInfo {
        name: value(CustomerField::Name),
        email: value(CustomerField::Email),
        phone: value(CustomerField::Phone),
        address: value(CustomerField::Address),
    }
}

/// Handle one event.
///
/// Shopper mistakes come back as an `Ok` update carrying an error notice;
/// every notice is also rendered into the notification fragment.
///
/// # Errors
///
/// Returns storage and render failures.
pub fn dispatch<S: KeyValueStore>(state: &mut AppState<S>, event: Event) -> Result<Update> {
    let result = match event {
        Event::Load => load(state),
        Event::AddToCart(product) => cart::add(state, product),
        Event::IncreaseQuantity(id) => cart::increase(state, &id),
        Event::DecreaseQuantity(id) => cart::decrease(state, &id),
        Event::RemoveItem(id) => cart::remove(state, &id),
        Event::OpenCart => cart::open(state),
        Event::CloseCart => Ok(cart::close(state)),
        Event::WindowClick { target } => Ok(cart::click_outside(state, &target)),
        Event::Checkout => checkout::begin(state),
        Event::ConfirmOrder(customer) => checkout::confirm(state, customer, &Local::now()),
    };
    let update = result.or_else(crate::error::AppError::into_update)?;
    with_notification(update)
}

/// Initial page render.
///
/// # Errors
///
/// Returns an error if a template fails to render.
pub fn load<S: KeyValueStore>(state: &AppState<S>) -> Result<Update> {
    Ok(cart::render(state)?.merge(contact::render(&state.config().contact)?))
}

fn with_notification(update: Update) -> Result<Update> {
    match &update.notice {
        Some(notice) => {
            let rendered = notice.render(bindings::NOTIFICATION)?;
            Ok(update.with_fragment(rendered))
        }
        None => Ok(update),
    }
}

/// Escaped plain text.
#[derive(Template)]
#[template(path = "partials/text.html")]
struct TextTemplate {
    text: String,
}

/// Render a template into a fragment for `target`.
pub(crate) fn fragment(target: &str, template: &impl Template) -> Result<Fragment> {
    Ok(Fragment::new(target, template.render()?.trim()))
}

/// Render escaped text into a fragment for `target`.
pub(crate) fn text_fragment(target: &str, text: &impl Display) -> Result<Fragment> {
    fragment(
        target,
        &TextTemplate {
            text: text.to_string(),
        },
    )
}
