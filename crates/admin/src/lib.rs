//! Tienda admin library.
//!
//! The order panel of the storefront page: the order table, the details
//! modal with its status select, deletion, tab switching and CSV export.
//! Handlers borrow the same [`Repository`](tienda_core::Repository) the
//! storefront owns.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod bindings;
pub mod components;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::AdminConfig;
pub use error::AdminError;
pub use routes::{AdminEvent, dispatch};
pub use state::AdminState;
