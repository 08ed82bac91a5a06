//! Storefront state: configuration, persisted lists and modal visibility.

use tienda_core::{KeyValueStore, OrderId, Repository, StorageError};

use crate::config::StorefrontConfig;

/// What the cart modal is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartModal {
    #[default]
    Closed,
    /// Cart lines, totals and the checkout button.
    Cart,
    /// Customer form with the order summary.
    Checkout,
    /// Thank-you panel for a confirmed order.
    Confirmation(OrderId),
}

impl CartModal {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// State of one open storefront page.
///
/// Owns the [`Repository`]; admin handlers borrow it through
/// [`AppState::repo_mut`] so both widgets see the same lists.
#[derive(Debug)]
pub struct AppState<S> {
    config: StorefrontConfig,
    repo: Repository<S>,
    modal: CartModal,
}

impl<S: KeyValueStore> AppState<S> {
    /// Load persisted state from `store`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the stored lists cannot be read.
    pub fn new(config: StorefrontConfig, store: S) -> Result<Self, StorageError> {
        Ok(Self::with_repository(config, Repository::load(store)?))
    }

    #[must_use]
    pub fn with_repository(config: StorefrontConfig, repo: Repository<S>) -> Self {
        Self {
            config,
            repo,
            modal: CartModal::Closed,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn repo(&self) -> &Repository<S> {
        &self.repo
    }

    pub const fn repo_mut(&mut self) -> &mut Repository<S> {
        &mut self.repo
    }

    #[must_use]
    pub const fn modal(&self) -> CartModal {
        self.modal
    }

    pub(crate) const fn set_modal(&mut self, modal: CartModal) {
        self.modal = modal;
    }
}
