//! Element ids and classes that bind catalog markup to storefront behavior.
//!
//! The markup is authored elsewhere; these names are the contract.

/// Cart badge button that opens the modal.
pub const CART_ICON: &str = "cart-icon";
/// Quantity shown on the badge.
pub const CART_COUNT: &str = "cart-count";
/// Cart modal overlay.
pub const CART_MODAL: &str = "cart-modal";
/// Close (×) control of the cart modal.
pub const CLOSE_MODAL: &str = "close-modal";
/// Modal body, replaced by the checkout form and the confirmation.
pub const CART_BODY: &str = "cart-body";
pub const CART_ITEMS: &str = "cart-items";
pub const CART_SUBTOTAL: &str = "cart-subtotal";
pub const CART_SHIPPING: &str = "cart-shipping";
pub const CART_TOTAL: &str = "cart-total";
pub const CHECKOUT_BTN: &str = "checkout-btn";
pub const CONFIRM_ORDER: &str = "confirm-order";
pub const CLOSE_AFTER_CHECKOUT: &str = "close-after-checkout";
pub const PHONE_NUMBER: &str = "phone-number";
pub const FOOTER_PHONE: &str = "footer-phone";
pub const FACEBOOK_LINK: &str = "facebook-link";
/// Transient notification container.
pub const NOTIFICATION: &str = "notification";

/// Class of every catalog "add to cart" button.
pub const ADD_TO_CART_CLASS: &str = "add-to-cart";
pub const QUANTITY_MINUS_CLASS: &str = "quantity-btn minus";
pub const QUANTITY_PLUS_CLASS: &str = "quantity-btn plus";
pub const REMOVE_ITEM_CLASS: &str = "remove-item";
