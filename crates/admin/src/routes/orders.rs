//! Order table and details modal handlers.

use askama::Template;
use tienda_core::{
    CartItem, Fragment, KeyValueStore, Notice, Order, OrderId, OrderLog, OrderStatus, Repository,
    Update,
};
use tracing::instrument;

use super::fragment;
use crate::bindings;
use crate::components::OrderColumn;
use crate::error::Result;
use crate::state::AdminState;

/// One row of the order table.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: String,
    pub customer_name: String,
    pub item_count_label: String,
    pub total: String,
    pub date: String,
    pub status: &'static str,
    pub status_label: &'static str,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            customer_name: order.customer.name.clone(),
            item_count_label: order.item_count_label(),
            total: order.total.to_string(),
            date: order.date.clone(),
            status: order.status.as_str(),
            status_label: order.status.label(),
        }
    }
}

/// A purchased line in the details modal.
#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub name: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartItem> for OrderItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            name: item.name.clone(),
            image: item.image.clone(),
            price: item.price.to_string(),
            quantity: item.quantity,
            line_total: item.line_total().to_string(),
        }
    }
}

/// An option of the status select.
#[derive(Debug, Clone)]
pub struct StatusOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Everything the details modal shows.
#[derive(Debug, Clone)]
pub struct OrderDetailsView {
    pub id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<OrderItemView>,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    pub statuses: Vec<StatusOptionView>,
}

impl From<&Order> for OrderDetailsView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            customer_name: order.customer.name.clone(),
            email: order.customer.email.clone(),
            phone: order.customer.phone.clone(),
            address: order.customer.address.clone(),
            items: order.items.iter().map(OrderItemView::from).collect(),
            subtotal: order.subtotal.to_string(),
            // The details modal always prints the amount, "$0.00" included.
            shipping: order.shipping.to_string(),
            total: order.total.to_string(),
            statuses: OrderStatus::ALL
                .iter()
                .map(|status| StatusOptionView {
                    value: status.as_str(),
                    label: status.label(),
                    selected: *status == order.status,
                })
                .collect(),
        }
    }
}

/// Order table body.
#[derive(Template)]
#[template(path = "orders/list.html")]
pub struct OrdersListTemplate<'a> {
    pub orders: &'a [OrderRowView],
    pub colspan: usize,
}

/// Order details modal.
#[derive(Template)]
#[template(path = "orders/details.html")]
pub struct OrderDetailsTemplate<'a> {
    pub order: &'a OrderDetailsView,
}

/// Render the order table body.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render(orders: &OrderLog) -> Result<Update> {
    let rows: Vec<OrderRowView> = orders.iter().map(OrderRowView::from).collect();
    let list = OrdersListTemplate {
        orders: &rows,
        colspan: OrderColumn::displayed_columns().count(),
    };
    Ok(Update::new().with_fragment(fragment(bindings::ORDERS_LIST, &list)?))
}

/// Open the details modal for an order. Unknown ids do nothing.
///
/// # Errors
///
/// Returns an error if the template fails to render.
#[instrument(skip(admin, repo))]
pub fn view<S: KeyValueStore>(
    admin: &mut AdminState,
    repo: &Repository<S>,
    id: OrderId,
) -> Result<Update> {
    let Some(order) = repo.orders().find(id) else {
        tracing::debug!(order_id = %id, "No such order to view");
        return Ok(Update::new());
    };

    let details = OrderDetailsView::from(order);
    let modal = fragment(
        bindings::DETAILS_MODAL,
        &OrderDetailsTemplate { order: &details },
    )?;
    admin.set_details(Some(id));

    Ok(Update::new().with_fragment(modal))
}

/// Close the details modal, removing its markup.
pub fn close_details(admin: &mut AdminState) -> Update {
    admin.set_details(None);
    Update::new().with_fragment(Fragment::new(bindings::DETAILS_MODAL, ""))
}

/// Change an order's status from the details select.
///
/// # Errors
///
/// Returns [`AdminError::Order`](crate::AdminError::Order) if the order is
/// gone, or a storage or render error.
#[instrument(skip(repo))]
pub fn change_status<S: KeyValueStore>(
    repo: &mut Repository<S>,
    id: OrderId,
    status: OrderStatus,
) -> Result<Update> {
    repo.orders_mut().set_status(id, status)?;
    repo.save_orders()?;
    tracing::info!(order_id = %id, status = %status, "Order status updated");
    render(repo.orders())
}

/// Delete an order once the operator has confirmed.
///
/// An unconfirmed request changes nothing.
///
/// # Errors
///
/// Returns [`AdminError::Order`](crate::AdminError::Order) if the order is
/// gone, or a storage or render error.
#[instrument(skip(admin, repo))]
pub fn delete<S: KeyValueStore>(
    admin: &mut AdminState,
    repo: &mut Repository<S>,
    id: OrderId,
    confirmed: bool,
) -> Result<Update> {
    if !confirmed {
        return Ok(Update::new());
    }

    repo.orders_mut().delete(id)?;
    repo.save_orders()?;
    tracing::info!(order_id = %id, "Order deleted");

    let mut update = render(repo.orders())?;
    if admin.details() == Some(id) {
        update = update.merge(close_details(admin));
    }
    Ok(update.with_notice(Notice::success("Pedido eliminado")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tienda_core::{Cart, CustomerInfo, MemoryStore, Price, ShippingPolicy};

    use super::*;
    use crate::error::AdminError;

    fn repo_with_orders(count: i64) -> Repository<MemoryStore> {
        let mut repo = Repository::load(MemoryStore::new()).unwrap();
        for n in 0..count {
            let mut cart = Cart::default();
            let jabon = CartItem::new("jabon", "Jabón \"artesanal\"", Price::from_units(40), "jabon.jpg");
            cart.add(jabon.clone());
            cart.add(jabon);
            cart.add(CartItem::new("vela", "Vela", Price::from_units(25), "vela.jpg"));
            let totals = ShippingPolicy::default().quote(&cart);
            let now = Utc.timestamp_millis_opt(1_790_000_000_000 + n).unwrap();
            repo.orders_mut()
                .place(
                    cart.snapshot(),
                    CustomerInfo::new("Luis", "luis@example.com", "5555-0000", "Zona 10"),
                    totals,
                    &now,
                )
                .unwrap();
        }
        repo.save_orders().unwrap();
        repo
    }

    fn first_id(repo: &Repository<MemoryStore>) -> OrderId {
        repo.orders().iter().next().unwrap().id
    }

    #[test]
    fn test_render_empty_log() {
        let repo = repo_with_orders(0);
        let update = render(repo.orders()).unwrap();
        let html = &update.fragment("orders-list").unwrap().html;
        assert!(html.contains("colspan=\"7\""));
        assert!(html.contains("No hay pedidos registrados"));
    }

    #[test]
    fn test_render_rows() {
        let repo = repo_with_orders(2);
        let id = first_id(&repo);
        let update = render(repo.orders()).unwrap();
        let html = &update.fragment("orders-list").unwrap().html;

        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.contains(&format!("#{id}")));
        assert!(html.contains("3 producto(s)"));
        assert!(html.contains("$255.00"));
        assert!(html.contains("status-pending"));
        assert!(html.contains("Pendiente"));
        assert!(html.contains(&format!("class=\"action-btn delete-btn\" data-id=\"{id}\"")));
    }

    #[test]
    fn test_view_renders_details() {
        let repo = repo_with_orders(1);
        let id = first_id(&repo);
        let mut admin = AdminState::default();

        let update = view(&mut admin, &repo, id).unwrap();
        let html = &update.fragment("details-modal").unwrap().html;

        assert!(html.contains(&format!("Detalles del Pedido #{id}")));
        assert!(html.contains("$40.00 x 2 = $80.00"));
        assert!(html.contains("<strong>Envío:</strong> $150.00"));
        assert!(html.contains("<option value=\"pending\" selected>Pendiente</option>"));
        assert!(html.contains("luis@example.com"));
        assert_eq!(admin.details(), Some(id));
    }

    #[test]
    fn test_view_unknown_order_is_noop() {
        let repo = repo_with_orders(1);
        let mut admin = AdminState::default();
        let update = view(&mut admin, &repo, OrderId::new(1)).unwrap();
        assert!(update.fragments.is_empty());
        assert_eq!(admin.details(), None);
    }

    #[test]
    fn test_change_status_persists() {
        let mut repo = repo_with_orders(1);
        let id = first_id(&repo);

        let update = change_status(&mut repo, id, OrderStatus::Completed).unwrap();

        assert!(
            update
                .fragment("orders-list")
                .unwrap()
                .html
                .contains("status-completed")
        );
        let raw = repo.store().raw("orders").unwrap();
        assert!(raw.contains("\"status\":\"completed\""));
    }

    #[test]
    fn test_change_status_unknown_order() {
        let mut repo = repo_with_orders(1);
        let err = change_status(&mut repo, OrderId::new(7), OrderStatus::Completed).unwrap_err();
        assert!(matches!(err, AdminError::Order(_)));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut repo = repo_with_orders(2);
        let id = first_id(&repo);
        let mut admin = AdminState::default();

        let update = delete(&mut admin, &mut repo, id, false).unwrap();
        assert!(update.fragments.is_empty());
        assert_eq!(repo.orders().len(), 2);

        let update = delete(&mut admin, &mut repo, id, true).unwrap();
        assert_eq!(update.notice.unwrap().message, "Pedido eliminado");
        assert_eq!(repo.orders().len(), 1);
        assert!(repo.orders().find(id).is_none());
    }

    #[test]
    fn test_delete_closes_open_details() {
        let mut repo = repo_with_orders(1);
        let id = first_id(&repo);
        let mut admin = AdminState::default();
        view(&mut admin, &repo, id).unwrap();

        let update = delete(&mut admin, &mut repo, id, true).unwrap();

        assert_eq!(admin.details(), None);
        assert_eq!(update.fragment("details-modal").unwrap().html, "");
        assert!(
            update
                .fragment("orders-list")
                .unwrap()
                .html
                .contains("No hay pedidos registrados")
        );
    }
}
