//! Order panel commands.

use std::io::{self, BufRead, Write};

use tienda_admin::components::OrderColumn;
use tienda_admin::{AdminEvent, dispatch};
use tienda_core::{OrderId, OrderStatus};

use super::{Output, Session};

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

fn handle(session: &mut Session, output: Output, event: AdminEvent) -> Result {
    let update = dispatch(&mut session.admin, session.page.repo_mut(), event)?;
    output.print(&update)?;
    Ok(())
}

/// Print the order table as tab-separated text.
#[allow(clippy::print_stdout)]
pub fn list(session: &Session) {
    let orders = session.page.repo().orders();
    if orders.is_empty() {
        println!("No hay pedidos registrados");
        return;
    }

    let header: Vec<&str> = OrderColumn::displayed_columns()
        .filter(|column| *column != OrderColumn::Actions)
        .map(OrderColumn::label)
        .collect();
    println!("{}", header.join("\t"));
    for order in orders {
        let row: Vec<String> = OrderColumn::displayed_columns()
            .filter_map(|column| column.value(order))
            .collect();
        println!("{}", row.join("\t"));
    }
}

/// Show an order's details modal.
#[allow(clippy::print_stdout)]
pub fn show(session: &mut Session, output: Output, id: OrderId) -> Result {
    let Some(order) = session.page.repo().orders().find(id) else {
        println!("No existe el pedido #{id}");
        return Ok(());
    };

    println!("Pedido #{}", order.id);
    println!("Nombre: {}", order.customer.name);
    println!("Email: {}", order.customer.email);
    println!("Teléfono: {}", order.customer.phone);
    println!("Dirección: {}", order.customer.address);
    for item in &order.items {
        println!(
            "  {}: {} x {} = {}",
            item.name,
            item.price,
            item.quantity,
            item.line_total()
        );
    }
    println!("Subtotal: {}", order.subtotal);
    println!("Envío: {}", order.shipping);
    println!("Total: {}", order.total);
    println!("Fecha: {}", order.date);
    println!("Estado: {}", order.status.label());

    handle(session, output, AdminEvent::ViewOrder(id))
}

pub fn change_status(
    session: &mut Session,
    output: Output,
    id: OrderId,
    status: OrderStatus,
) -> Result {
    handle(session, output, AdminEvent::ChangeStatus { id, status })
}

/// Delete an order, asking first unless `yes` is set.
pub fn delete(session: &mut Session, output: Output, id: OrderId, yes: bool) -> Result {
    let confirmed = yes || confirm_delete(io::stdin().lock())?;
    handle(session, output, AdminEvent::DeleteOrder { id, confirmed })
}

#[allow(clippy::print_stdout)]
fn confirm_delete(mut input: impl BufRead) -> io::Result<bool> {
    print!("¿Estás seguro de que deseas eliminar este pedido? [s/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

/// Whether a prompt answer agrees. Anything else, blank included, is a no.
fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}

pub fn export(session: &mut Session, output: Output) -> Result {
    handle(session, output, AdminEvent::ExportOrders)
}

pub fn switch_tab(session: &mut Session, output: Output, tab: String) -> Result {
    handle(session, output, AdminEvent::SwitchTab(tab))
}
