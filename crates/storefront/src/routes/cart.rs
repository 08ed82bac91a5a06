//! Cart event handlers.
//!
//! Every mutation saves the cart and re-renders the badge, the line list and
//! the summary, mirroring what the page shows after each click.

use askama::Template;
use serde::Deserialize;
use tienda_core::{
    Cart, CartItem, KeyValueStore, Notice, Price, ProductId, ShippingPolicy, Update,
};
use tracing::instrument;

use super::{fragment, text_fragment};
use crate::bindings;
use crate::error::{AppError, Result};
use crate::state::{AppState, CartModal};

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Build the view, showing `$0.00` everywhere for an empty cart.
    #[must_use]
    pub fn new(cart: &Cart, policy: &ShippingPolicy) -> Self {
        if cart.is_empty() {
            return Self::empty();
        }
        let totals = policy.quote(cart);
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: totals.subtotal.to_string(),
            shipping: totals.shipping_label(),
            total: totals.total.to_string(),
            item_count: cart.item_count(),
        }
    }

    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        let zero = Price::ZERO.to_string();
        Self {
            items: Vec::new(),
            subtotal: zero.clone(),
            shipping: zero.clone(),
            total: zero,
            item_count: 0,
        }
    }
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: item.price.to_string(),
            line_price: item.line_total().to_string(),
        }
    }
}

/// Data attributes of an `.add-to-cart` button.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductData {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
}

impl ProductData {
    fn into_item(self) -> Result<CartItem> {
        let price: Price = self
            .price
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Precio inválido: {}", self.price)))?;
        Ok(CartItem::new(self.id, self.name, price, self.image))
    }
}

/// Cart lines fragment template.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub cart: &'a CartView,
}

/// Modal body with lines, summary and checkout button.
#[derive(Template)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate<'a> {
    pub cart: &'a CartView,
}

/// Render the badge, lines and summary for the current cart.
///
/// # Errors
///
/// Returns an error if a template fails to render.
pub fn render<S: KeyValueStore>(state: &AppState<S>) -> Result<Update> {
    let cart = CartView::new(state.repo().cart(), &state.config().shipping);
    Ok(Update::new().with_fragments([
        text_fragment(bindings::CART_COUNT, &cart.item_count)?,
        fragment(bindings::CART_ITEMS, &CartItemsTemplate { cart: &cart })?,
        text_fragment(bindings::CART_SUBTOTAL, &cart.subtotal)?,
        text_fragment(bindings::CART_SHIPPING, &cart.shipping)?,
        text_fragment(bindings::CART_TOTAL, &cart.total)?,
    ]))
}

/// Add a product from its button data.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] for an unparseable price, or a storage
/// or render error.
#[instrument(skip(state))]
pub fn add<S: KeyValueStore>(state: &mut AppState<S>, product: ProductData) -> Result<Update> {
    let item = product.into_item()?;
    let notice = Notice::success(format!("{} añadido al carrito", item.name));
    let id = item.id.clone();

    let quantity = state.repo_mut().cart_mut().add(item);
    state.repo_mut().save_cart()?;
    tracing::info!(product = %id, quantity, "Added to cart");

    Ok(render(state)?.with_notice(notice))
}

/// Increase a line's quantity by one.
///
/// # Errors
///
/// Returns [`AppError::Cart`] if the line is gone, or a storage or render
/// error.
#[instrument(skip(state))]
pub fn increase<S: KeyValueStore>(state: &mut AppState<S>, id: &ProductId) -> Result<Update> {
    let quantity = state.repo_mut().cart_mut().increase(id)?;
    state.repo_mut().save_cart()?;
    tracing::info!(product = %id, quantity, "Increased quantity");
    render(state)
}

/// Decrease a line's quantity by one, dropping it below one.
///
/// # Errors
///
/// Returns [`AppError::Cart`] if the line is gone, or a storage or render
/// error.
#[instrument(skip(state))]
pub fn decrease<S: KeyValueStore>(state: &mut AppState<S>, id: &ProductId) -> Result<Update> {
    let quantity = state.repo_mut().cart_mut().decrease(id)?;
    state.repo_mut().save_cart()?;
    tracing::info!(product = %id, quantity, "Decreased quantity");
    render(state)
}

/// Remove a line entirely.
///
/// # Errors
///
/// Returns [`AppError::Cart`] if the line is gone, or a storage or render
/// error.
#[instrument(skip(state))]
pub fn remove<S: KeyValueStore>(state: &mut AppState<S>, id: &ProductId) -> Result<Update> {
    state.repo_mut().cart_mut().remove(id)?;
    state.repo_mut().save_cart()?;
    tracing::info!(product = %id, "Removed from cart");
    Ok(render(state)?.with_notice(Notice::success("Producto eliminado del carrito")))
}

/// Open the cart modal on its cart panel.
///
/// # Errors
///
/// Returns an error if a template fails to render.
pub fn open<S: KeyValueStore>(state: &mut AppState<S>) -> Result<Update> {
    state.set_modal(CartModal::Cart);
    let cart = CartView::new(state.repo().cart(), &state.config().shipping);
    Ok(render(state)?.with_fragment(fragment(
        bindings::CART_BODY,
        &CartPanelTemplate { cart: &cart },
    )?))
}

/// Close the cart modal.
pub fn close<S: KeyValueStore>(state: &mut AppState<S>) -> Update {
    state.set_modal(CartModal::Closed);
    Update::new()
}

/// Window click: closes the modal when the overlay itself was clicked.
pub fn click_outside<S: KeyValueStore>(state: &mut AppState<S>, target: &str) -> Update {
    if target == bindings::CART_MODAL {
        return close(state);
    }
    Update::new()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use tienda_core::MemoryStore;

    use super::*;
    use crate::config::StorefrontConfig;

    fn state() -> AppState<MemoryStore> {
        AppState::new(StorefrontConfig::default(), MemoryStore::new()).unwrap()
    }

    fn product(id: &str, price: &str) -> ProductData {
        ProductData {
            id: id.to_string(),
            name: format!("Producto {id}"),
            price: price.to_string(),
            image: format!("img/{id}.jpg"),
        }
    }

    #[test]
    fn test_add_twice_renders_one_line() {
        let mut state = state();
        add(&mut state, product("a", "100")).unwrap();
        let update = add(&mut state, product("a", "100")).unwrap();

        assert_eq!(update.fragment("cart-count").unwrap().html, "2");
        let items = &update.fragment("cart-items").unwrap().html;
        assert_eq!(items.matches("class=\"cart-item\"").count(), 1);
        assert_eq!(update.fragment("cart-subtotal").unwrap().html, "$200.00");
        assert_eq!(update.fragment("cart-shipping").unwrap().html, "$150.00");
        assert_eq!(update.fragment("cart-total").unwrap().html, "$350.00");
        assert_eq!(
            update.notice.unwrap().message,
            "Producto a añadido al carrito"
        );
    }

    #[test]
    fn test_add_persists_cart() {
        let mut state = state();
        add(&mut state, product("a", "10")).unwrap();

        let raw = state.repo().store().raw("cart").unwrap();
        assert!(raw.contains("\"quantity\":1"));
    }

    #[test]
    fn test_free_shipping_label() {
        let mut state = state();
        let update = add(&mut state, product("tv", "2500")).unwrap();
        assert_eq!(update.fragment("cart-shipping").unwrap().html, "Gratis");
        assert_eq!(update.fragment("cart-total").unwrap().html, "$2500.00");
    }

    #[test]
    fn test_bad_price_is_rejected() {
        let mut state = state();
        let err = add(&mut state, product("a", "barato")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(state.repo().cart().is_empty());
    }

    #[test]
    fn test_oversized_price_is_rejected_before_saving() {
        let mut state = state();
        for _ in 0..2 {
            let err = add(&mut state, product("yate", "79228162514264337593543950335")).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
        assert!(state.repo().cart().is_empty());
        assert!(state.repo().store().raw("cart").is_none());

        add(&mut state, product("casa", "1000000000000")).unwrap();
        let update = add(&mut state, product("casa", "1000000000000")).unwrap();
        assert_eq!(
            update.fragment("cart-subtotal").unwrap().html,
            "$2000000000000.00"
        );
    }

    #[test]
    fn test_decrease_to_zero_shows_empty_cart() {
        let mut state = state();
        add(&mut state, product("a", "10")).unwrap();
        let update = decrease(&mut state, &"a".into()).unwrap();

        assert!(
            update
                .fragment("cart-items")
                .unwrap()
                .html
                .contains("Tu carrito está vacío")
        );
        assert_eq!(update.fragment("cart-total").unwrap().html, "$0.00");
        assert_eq!(update.fragment("cart-shipping").unwrap().html, "$0.00");
    }

    #[test]
    fn test_remove_notice() {
        let mut state = state();
        add(&mut state, product("a", "10")).unwrap();
        increase(&mut state, &"a".into()).unwrap();
        let update = remove(&mut state, &"a".into()).unwrap();

        assert_eq!(
            update.notice.unwrap().message,
            "Producto eliminado del carrito"
        );
        assert!(state.repo().cart().is_empty());
    }

    #[test]
    fn test_names_are_escaped() {
        let mut state = state();
        let mut data = product("x", "1");
        data.name = "<b>Pan</b>".to_string();
        let update = add(&mut state, data).unwrap();

        let items = &update.fragment("cart-items").unwrap().html;
        assert!(!items.contains("<b>Pan</b>"));
    }

    #[test]
    fn test_modal_open_and_overlay_click() {
        let mut state = state();
        let update = open(&mut state).unwrap();
        assert!(state.modal().is_open());
        assert!(update.fragment("cart-body").unwrap().html.contains("checkout-btn"));

        click_outside(&mut state, "product-grid");
        assert!(state.modal().is_open());

        click_outside(&mut state, "cart-modal");
        assert_eq!(state.modal(), CartModal::Closed);
    }
}
