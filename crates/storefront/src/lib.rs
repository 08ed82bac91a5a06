//! Tienda Storefront library.
//!
//! The shopper-facing half of the widget: cart badge and modal, checkout
//! form, order confirmation and contact details. Handlers take an
//! [`state::AppState`], mutate the persisted cart or order log, and answer
//! with the HTML fragments to swap into the page.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod bindings;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::StorefrontConfig;
pub use error::AppError;
pub use routes::{Event, dispatch};
pub use state::{AppState, CartModal};
