//! Panel tab bar.

use askama::Template;
use tienda_core::Update;

use super::fragment;
use crate::bindings;
use crate::error::{AdminError, Result};
use crate::state::AdminState;

#[derive(Debug, Clone)]
pub struct TabView {
    pub name: String,
    pub active: bool,
}

/// Tab buttons, with the active one marked.
#[derive(Template)]
#[template(path = "partials/tabs.html")]
pub struct TabsTemplate {
    pub tabs: Vec<TabView>,
}

/// Render the tab bar.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render(admin: &AdminState) -> Result<Update> {
    let tabs = admin
        .config()
        .tabs
        .iter()
        .map(|name| TabView {
            name: name.clone(),
            active: name == admin.active_tab(),
        })
        .collect();
    Ok(Update::new().with_fragment(fragment(bindings::ADMIN_TABS, &TabsTemplate { tabs })?))
}

/// Make `tab` the only active tab.
///
/// # Errors
///
/// Returns [`AdminError::UnknownTab`] for a tab that is not configured, or a
/// render error.
pub fn switch(admin: &mut AdminState, tab: &str) -> Result<Update> {
    if !admin.config().tabs.iter().any(|name| name == tab) {
        return Err(AdminError::UnknownTab(tab.to_string()));
    }
    admin.set_active_tab(tab.to_string());
    tracing::debug!(tab, "Switched tab");
    render(admin)
}
