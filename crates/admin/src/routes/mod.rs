//! Admin panel event handlers.
//!
//! # Event Structure
//!
//! ```text
//! DOMContentLoaded              - Load: tab bar and order table
//!
//! # Orders
//! click .view-btn               - Open details modal (data-id)
//! click #close-details          - Close details modal
//! click #close-details-modal    - Close details modal
//! change #order-status          - Change status (data-id, value)
//! click .delete-btn             - Delete order after confirmation (data-id)
//! click #export-orders          - Write the CSV export
//!
//! # Tabs
//! click .tab-btn                - Activate tab (data-tab)
//! ```

pub mod export;
pub mod orders;
pub mod tabs;

use std::collections::HashMap;

use askama::Template;
use chrono::Utc;
use tienda_core::{Fragment, KeyValueStore, OrderId, OrderStatus, Repository, Update};

use crate::bindings;
use crate::error::{AdminError, Result};
use crate::state::AdminState;

/// An admin panel event, after the element binding has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminEvent {
    Load,
    ViewOrder(OrderId),
    CloseDetails,
    ChangeStatus { id: OrderId, status: OrderStatus },
    /// `confirmed` is the operator's answer to the confirmation prompt.
    DeleteOrder { id: OrderId, confirmed: bool },
    SwitchTab(String),
    ExportOrders,
}

impl AdminEvent {
    /// Resolve an interaction with a bound element.
    ///
    /// `data` holds the element's `data-*` attributes without the prefix;
    /// the status select also passes its `value`, and the delete button the
    /// prompt answer as `confirmed`. Returns `None` for unbound elements or
    /// unparseable ids.
    #[must_use]
    pub fn from_click(element: &str, data: &HashMap<String, String>) -> Option<Self> {
        let order_id = || data.get("id")?.parse::<OrderId>().ok();
        match element {
            bindings::VIEW_BTN_CLASS => order_id().map(Self::ViewOrder),
            bindings::CLOSE_DETAILS | bindings::CLOSE_DETAILS_MODAL => Some(Self::CloseDetails),
            bindings::ORDER_STATUS => Some(Self::ChangeStatus {
                id: order_id()?,
                status: data.get("value")?.parse().ok()?,
            }),
            bindings::DELETE_BTN_CLASS => Some(Self::DeleteOrder {
                id: order_id()?,
                confirmed: data.get("confirmed").is_some_and(|answer| answer == "true"),
            }),
            bindings::TAB_BTN_CLASS => data.get("tab").cloned().map(Self::SwitchTab),
            bindings::EXPORT_ORDERS => Some(Self::ExportOrders),
            _ => None,
        }
    }
}

/// Handle one event against the shared repository.
///
/// Operator mistakes come back as an `Ok` update carrying an error notice;
/// every notice is also rendered into the notification fragment.
///
/// # Errors
///
/// Returns storage, export-write and render failures.
pub fn dispatch<S: KeyValueStore>(
    admin: &mut AdminState,
    repo: &mut Repository<S>,
    event: AdminEvent,
) -> Result<Update> {
    let result = match event {
        AdminEvent::Load => load(admin, repo),
        AdminEvent::ViewOrder(id) => orders::view(admin, repo, id),
        AdminEvent::CloseDetails => Ok(orders::close_details(admin)),
        AdminEvent::ChangeStatus { id, status } => orders::change_status(repo, id, status),
        AdminEvent::DeleteOrder { id, confirmed } => orders::delete(admin, repo, id, confirmed),
        AdminEvent::SwitchTab(tab) => tabs::switch(admin, &tab),
        AdminEvent::ExportOrders => export::export(admin, repo.orders(), Utc::now()),
    };
    let update = result.or_else(AdminError::into_update)?;
    with_notification(update)
}

/// Initial panel render.
///
/// # Errors
///
/// Returns an error if a template fails to render.
pub fn load<S: KeyValueStore>(admin: &AdminState, repo: &Repository<S>) -> Result<Update> {
    Ok(tabs::render(admin)?.merge(orders::render(repo.orders())?))
}

fn with_notification(update: Update) -> Result<Update> {
    let Some(notice) = &update.notice else {
        return Ok(update);
    };
    let rendered = notice.render(bindings::NOTIFICATION)?;
    Ok(update.with_fragment(rendered))
}

/// Render a template into a fragment for `target`.
pub(crate) fn fragment(target: &str, template: &impl Template) -> Result<Fragment> {
    Ok(Fragment::new(target, template.render()?.trim()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tienda_core::{MemoryStore, NoticeKind};

    use super::*;

    fn data(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_from_click_order_controls() {
        assert_eq!(
            AdminEvent::from_click("view-btn", &data(&[("id", "1790000000000")])),
            Some(AdminEvent::ViewOrder(OrderId::new(1_790_000_000_000)))
        );
        assert_eq!(
            AdminEvent::from_click("order-status", &data(&[("id", "5"), ("value", "completed")])),
            Some(AdminEvent::ChangeStatus {
                id: OrderId::new(5),
                status: OrderStatus::Completed,
            })
        );
        assert_eq!(
            AdminEvent::from_click("order-status", &data(&[("id", "5"), ("value", "lost")])),
            None
        );
        assert_eq!(AdminEvent::from_click("view-btn", &data(&[("id", "abc")])), None);
    }

    #[test]
    fn test_from_click_delete_defaults_to_unconfirmed() {
        assert_eq!(
            AdminEvent::from_click("delete-btn", &data(&[("id", "5")])),
            Some(AdminEvent::DeleteOrder {
                id: OrderId::new(5),
                confirmed: false,
            })
        );
        assert_eq!(
            AdminEvent::from_click("delete-btn", &data(&[("id", "5"), ("confirmed", "true")])),
            Some(AdminEvent::DeleteOrder {
                id: OrderId::new(5),
                confirmed: true,
            })
        );
    }

    #[test]
    fn test_dispatch_export_with_no_orders() {
        let mut admin = AdminState::default();
        let mut repo = Repository::load(MemoryStore::new()).unwrap();

        let update = dispatch(&mut admin, &mut repo, AdminEvent::ExportOrders).unwrap();

        let notice = update.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "No hay pedidos para exportar");
        assert!(
            update
                .fragment("notification")
                .unwrap()
                .html
                .contains("notification error")
        );
    }

    #[test]
    fn test_dispatch_load() {
        let mut admin = AdminState::default();
        let mut repo = Repository::load(MemoryStore::new()).unwrap();

        let update = dispatch(&mut admin, &mut repo, AdminEvent::Load).unwrap();

        assert!(update.fragment("admin-tabs").is_some());
        assert!(
            update
                .fragment("orders-list")
                .unwrap()
                .html
                .contains("No hay pedidos registrados")
        );
        assert!(update.notice.is_none());
    }

    #[test]
    fn test_dispatch_delete_missing_order_is_a_notice() {
        let mut admin = AdminState::default();
        let mut repo = Repository::load(MemoryStore::new()).unwrap();
        let event = AdminEvent::DeleteOrder {
            id: OrderId::new(9),
            confirmed: true,
        };

        let update = dispatch(&mut admin, &mut repo, event).unwrap();
        assert_eq!(update.notice.unwrap().message, "El pedido ya no existe");
    }
}
