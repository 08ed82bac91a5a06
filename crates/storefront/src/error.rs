//! Unified error handling for storefront event handlers.
//!
//! Handlers return `Result<Update, AppError>`. Errors the shopper caused
//! (empty cart, blank form field, stale button) become an error [`Notice`]
//! via [`AppError::into_update`]; storage and template failures stay errors
//! and are logged.

use thiserror::Error;
use tienda_core::{CartError, CheckoutError, Notice, StorageError, Update};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persisted state could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// A cart line referenced by a control no longer exists.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout preconditions were not met.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Malformed element data.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the shopper should see this error as a notice.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Cart(_) | Self::Checkout(_) | Self::BadRequest(_)
        )
    }

    /// Message shown to the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Checkout(CheckoutError::EmptyCart) => "El carrito está vacío".to_string(),
            Self::Checkout(CheckoutError::MissingField(_)) => {
                "Por favor completa todos los campos".to_string()
            }
            Self::Cart(CartError::ItemNotFound(_)) => {
                "El producto ya no está en el carrito".to_string()
            }
            Self::BadRequest(message) => message.clone(),
            // Don't expose internal error details to shoppers
            Self::Storage(_) | Self::Render(_) => "Ocurrió un error inesperado".to_string(),
        }
    }

    /// Turn a user-facing error into an error notice; pass others through.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged when it is not user-facing.
    pub fn into_update(self) -> std::result::Result<Update, Self> {
        if self.is_user_facing() {
            tracing::warn!(error = %self, "Rejected storefront event");
            Ok(Update::notice(Notice::error(self.user_message())))
        } else {
            tracing::error!(error = %self, "Storefront event failed");
            Err(self)
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
