//! Unified error handling for admin event handlers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tienda_core::{Notice, OrderError, StorageError, Update};

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Persisted state could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// A control referenced an order that is gone.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Export requested with an empty order log.
    #[error("No orders to export")]
    NothingToExport,

    /// The export file could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Export { path: PathBuf, source: io::Error },

    /// A tab button named a tab that is not configured.
    #[error("Unknown tab: {0}")]
    UnknownTab(String),
}

impl AdminError {
    /// Whether the operator should see this error as a notice.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Order(_) | Self::NothingToExport | Self::UnknownTab(_)
        )
    }

    /// Message shown to the operator.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Order(OrderError::NotFound(_)) => "El pedido ya no existe".to_string(),
            Self::NothingToExport => "No hay pedidos para exportar".to_string(),
            Self::UnknownTab(tab) => format!("Pestaña desconocida: {tab}"),
            // Don't expose internal error details
            Self::Storage(_) | Self::Render(_) | Self::Export { .. } => {
                "Ocurrió un error inesperado".to_string()
            }
        }
    }

    /// Turn a user-facing error into an error notice; pass others through.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged when it is not user-facing.
    pub fn into_update(self) -> std::result::Result<Update, Self> {
        if self.is_user_facing() {
            tracing::warn!(error = %self, "Rejected admin event");
            Ok(Update::notice(Notice::error(self.user_message())))
        } else {
            tracing::error!(error = %self, "Admin event failed");
            Err(self)
        }
    }
}

/// Result type alias for `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;
