//! Integration tests for shopping through order confirmation.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use tienda_core::{NoticeKind, OrderStatus, ProductId};
use tienda_integration_tests::{customer, memory_page, product, stored};
use tienda_storefront::{CartModal, Event, dispatch};

// =============================================================================
// Happy Path
// =============================================================================

#[test]
fn test_shop_and_confirm() {
    let mut page = memory_page();

    dispatch(&mut page, Event::AddToCart(product("1", "Café", "85.50"))).unwrap();
    dispatch(&mut page, Event::AddToCart(product("1", "Café", "85.50"))).unwrap();
    let update = dispatch(&mut page, Event::AddToCart(product("2", "Miel", "40"))).unwrap();

    assert_eq!(update.fragment("cart-count").unwrap().html, "3");
    assert_eq!(update.fragment("cart-subtotal").unwrap().html, "$211.00");
    assert_eq!(update.fragment("cart-total").unwrap().html, "$361.00");
    assert!(
        update
            .fragment("notification")
            .unwrap()
            .html
            .contains("Miel añadido al carrito")
    );

    let update = dispatch(&mut page, Event::Checkout).unwrap();
    assert!(update.fragment("cart-body").unwrap().html.contains("confirm-order"));
    assert_eq!(page.modal(), CartModal::Checkout);

    let update = dispatch(&mut page, Event::ConfirmOrder(customer("Ana"))).unwrap();
    assert!(update.notice.is_none());
    assert_eq!(update.fragment("cart-count").unwrap().html, "0");

    let orders = page.repo().orders();
    assert_eq!(orders.len(), 1);
    let order = orders.iter().next().unwrap();
    assert_eq!(order.item_count(), 3);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, order.subtotal + order.shipping);
    assert_eq!(page.modal(), CartModal::Confirmation(order.id));
    assert!(page.repo().cart().is_empty());
}

#[test]
fn test_persisted_order_format() {
    let mut page = memory_page();
    dispatch(&mut page, Event::AddToCart(product("1", "Café", "85.50"))).unwrap();
    dispatch(&mut page, Event::ConfirmOrder(customer("Ana"))).unwrap();

    let raw = stored(&page, "orders").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let order = &json[0];

    assert!(order["id"].is_i64());
    assert_eq!(order["customerName"], "Ana");
    assert_eq!(order["customerEmail"], "ana@example.com");
    assert_eq!(order["status"], "pending");
    assert_eq!(order["subtotal"].as_f64(), Some(85.5));
    assert_eq!(order["shipping"].as_f64(), Some(150.0));
    assert_eq!(order["items"][0]["quantity"], 1);

    assert_eq!(stored(&page, "cart").unwrap().as_deref(), Some("[]"));
}

// =============================================================================
// Shipping Threshold
// =============================================================================

#[test]
fn test_threshold_is_exclusive() {
    let mut page = memory_page();
    let update = dispatch(&mut page, Event::AddToCart(product("tv", "Televisor", "2000"))).unwrap();
    assert_eq!(update.fragment("cart-shipping").unwrap().html, "$150.00");
    assert_eq!(update.fragment("cart-total").unwrap().html, "$2150.00");

    let update = dispatch(&mut page, Event::AddToCart(product("clip", "Clip", "0.01"))).unwrap();
    assert_eq!(update.fragment("cart-shipping").unwrap().html, "Gratis");
    assert_eq!(update.fragment("cart-total").unwrap().html, "$2000.01");
}

// =============================================================================
// Rejected Events
// =============================================================================

#[test]
fn test_checkout_empty_cart() {
    let mut page = memory_page();
    let update = dispatch(&mut page, Event::Checkout).unwrap();

    let notice = update.notice.unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "El carrito está vacío");
    assert_eq!(page.modal(), CartModal::Closed);
}

#[test]
fn test_blank_field_places_nothing() {
    let mut page = memory_page();
    dispatch(&mut page, Event::AddToCart(product("1", "Café", "85.50"))).unwrap();

    let mut info = customer("Ana");
    info.phone = "   ".to_string();
    let update = dispatch(&mut page, Event::ConfirmOrder(info)).unwrap();

    assert_eq!(
        update.notice.unwrap().message,
        "Por favor completa todos los campos"
    );
    assert!(page.repo().orders().is_empty());
    assert_eq!(page.repo().cart().item_count(), 1);
}

#[test]
fn test_stale_quantity_button() {
    let mut page = memory_page();
    let update = dispatch(&mut page, Event::IncreaseQuantity(ProductId::new("gone"))).unwrap();

    assert_eq!(
        update.notice.unwrap().message,
        "El producto ya no está en el carrito"
    );
}

#[test]
fn test_overlay_click_closes_modal() {
    let mut page = memory_page();
    dispatch(&mut page, Event::OpenCart).unwrap();
    assert!(page.modal().is_open());

    dispatch(
        &mut page,
        Event::WindowClick {
            target: "cart-modal".to_string(),
        },
    )
    .unwrap();
    assert_eq!(page.modal(), CartModal::Closed);
}
