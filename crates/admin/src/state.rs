//! Admin panel state: configuration, active tab and the open details modal.

use tienda_core::OrderId;

use crate::config::AdminConfig;

/// State of the admin panel on one open page.
///
/// The order log itself lives in the storefront's
/// [`Repository`](tienda_core::Repository); handlers take it as a separate
/// borrow.
#[derive(Debug, Clone)]
pub struct AdminState {
    config: AdminConfig,
    active_tab: String,
    details: Option<OrderId>,
}

impl AdminState {
    /// Start with the first configured tab active and no modal open.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let active_tab = config.tabs.first().cloned().unwrap_or_default();
        Self {
            config,
            active_tab,
            details: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AdminConfig {
        &self.config
    }

    #[must_use]
    pub fn active_tab(&self) -> &str {
        &self.active_tab
    }

    pub(crate) fn set_active_tab(&mut self, tab: String) {
        self.active_tab = tab;
    }

    /// Order shown in the details modal, if it is open.
    #[must_use]
    pub const fn details(&self) -> Option<OrderId> {
        self.details
    }

    pub(crate) const fn set_details(&mut self, details: Option<OrderId>) {
        self.details = details;
    }
}

impl Default for AdminState {
    fn default() -> Self {
        Self::new(AdminConfig::default())
    }
}
