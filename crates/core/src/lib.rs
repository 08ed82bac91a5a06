//! Tienda Core - Shared types library.
//!
//! This crate provides the domain model used by all Tienda components:
//! - `storefront` - Cart, checkout and contact widgets
//! - `admin` - Order list, details, status changes and CSV export
//! - `cli` - Command-line driver that replays widget events
//!
//! # Architecture
//!
//! The core crate holds types, arithmetic and the key-value storage seam.
//! The only I/O lives behind the `fs` feature ([`storage::FileStore`]), so
//! the rest of the crate can be used anywhere, including tests that run
//! entirely against [`storage::MemoryStore`].
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and statuses
//! - [`cart`] - The in-progress cart and its quantity rules
//! - [`pricing`] - Subtotal, shipping and total computation
//! - [`order`] - Customer details, orders and the order log
//! - [`storage`] - Key-value persistence and the [`storage::Repository`]
//! - [`view`] - Rendered fragments and user-facing notices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod order;
pub mod pricing;
pub mod storage;
pub mod types;
pub mod view;

pub use cart::{Cart, CartError, CartItem};
pub use order::{CheckoutError, CustomerField, CustomerInfo, Order, OrderError, OrderLog};
pub use pricing::{ShippingPolicy, Totals};
#[cfg(feature = "fs")]
pub use storage::FileStore;
pub use storage::{KeyValueStore, MemoryStore, Repository, StorageError};
pub use types::*;
pub use view::{Fragment, Notice, NoticeKind, Update};
