//! Cart and checkout commands.

use tienda_core::{CustomerInfo, ProductId};
use tienda_storefront::routes::cart::{CartView, ProductData};
use tienda_storefront::{CartModal, Event, dispatch};

use super::{Output, Session};

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

fn handle(session: &mut Session, output: Output, event: Event) -> Result {
    let update = dispatch(&mut session.page, event)?;
    output.print(&update)?;
    Ok(())
}

/// Render the whole page: storefront and order panel.
pub fn load(session: &mut Session, output: Output) -> Result {
    let page = dispatch(&mut session.page, Event::Load)?;
    let panel = tienda_admin::dispatch(
        &mut session.admin,
        session.page.repo_mut(),
        tienda_admin::AdminEvent::Load,
    )?;
    output.print(&page.merge(panel))?;
    Ok(())
}

pub fn add(
    session: &mut Session,
    output: Output,
    id: String,
    name: String,
    price: String,
    image: String,
) -> Result {
    handle(
        session,
        output,
        Event::AddToCart(ProductData {
            id,
            name,
            price,
            image,
        }),
    )
}

pub fn increase(session: &mut Session, output: Output, id: &str) -> Result {
    handle(session, output, Event::IncreaseQuantity(ProductId::new(id)))
}

pub fn decrease(session: &mut Session, output: Output, id: &str) -> Result {
    handle(session, output, Event::DecreaseQuantity(ProductId::new(id)))
}

pub fn remove(session: &mut Session, output: Output, id: &str) -> Result {
    handle(session, output, Event::RemoveItem(ProductId::new(id)))
}

pub fn open(session: &mut Session, output: Output) -> Result {
    handle(session, output, Event::OpenCart)
}

pub fn close(session: &mut Session, output: Output) -> Result {
    handle(session, output, Event::CloseCart)
}

/// Print the cart lines and totals as plain text.
#[allow(clippy::print_stdout)]
pub fn show(session: &Session) {
    let cart = CartView::new(session.page.repo().cart(), &session.page.config().shipping);
    if cart.items.is_empty() {
        println!("Tu carrito está vacío");
    }
    for item in &cart.items {
        println!(
            "{}\t{}\t{} x {} = {}",
            item.id, item.name, item.price, item.quantity, item.line_price
        );
    }
    println!("Productos: {}", cart.item_count);
    println!("Subtotal: {}", cart.subtotal);
    println!("Envío: {}", cart.shipping);
    println!("Total: {}", cart.total);
}

pub fn begin_checkout(session: &mut Session, output: Output) -> Result {
    handle(session, output, Event::Checkout)
}

/// Place the order and print its number.
#[allow(clippy::print_stdout)]
pub fn confirm(session: &mut Session, output: Output, customer: CustomerInfo) -> Result {
    handle(session, output, Event::ConfirmOrder(customer))?;
    if let CartModal::Confirmation(id) = session.page.modal() {
        println!("¡Pedido Confirmado! Número de pedido: #{id}");
    }
    Ok(())
}
