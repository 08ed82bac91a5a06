//! Tienda CLI - drive the storefront page and order panel from a terminal.
//!
//! Every invocation is a page load: the cart and order log are read from the
//! data directory, one event is handled, and the result is printed.
//!
//! # Usage
//!
//! ```bash
//! # Add a product and look at the cart
//! tienda cart add --id 3 --name "Café" --price 85.50 --image img/cafe.jpg
//! tienda cart show
//!
//! # Place the order
//! tienda checkout confirm --name "Ana" --email ana@example.com \
//!     --phone "5555-0101" --address "Zona 1"
//!
//! # Manage orders
//! tienda orders list
//! tienda orders status 1760630400000 completed
//! tienda orders export
//! ```
//!
//! # Commands
//!
//! - `load` - Render the page as on first load
//! - `cart` - Add, change and remove cart lines; open or close the modal
//! - `checkout` - Show the customer form or place the order
//! - `orders` - List, inspect, update, delete and export orders
//! - `tab` - Activate an admin panel tab

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tienda_core::{OrderId, OrderStatus};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "tienda")]
#[command(author, version, about = "Tienda storefront and order panel")]
struct Cli {
    /// Directory holding cart.json and orders.json (overrides `TIENDA_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print every rendered HTML fragment
    #[arg(long, global = true)]
    fragments: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the page as on first load
    Load,
    /// Work with the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Check out the current cart
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
    /// Manage placed orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Activate an admin panel tab
    Tab {
        /// Tab name
        name: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,

        /// Unit price, e.g. 85.50
        #[arg(long)]
        price: String,

        /// Image URL
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Increase a line's quantity by one
    Inc { id: String },
    /// Decrease a line's quantity by one, removing it at zero
    Dec { id: String },
    /// Remove a line
    Remove { id: String },
    /// Print the cart lines and totals
    Show,
    /// Open the cart modal
    Open,
    /// Close the cart modal
    Close,
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Show the customer form with the order summary
    Begin,
    /// Place the order
    Confirm {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        address: String,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// Print the order table
    List,
    /// Show one order's details
    Show { id: OrderId },
    /// Change an order's status (`pending`, `completed`)
    Status { id: OrderId, status: OrderStatus },
    /// Delete an order
    Delete {
        id: OrderId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Write the CSV export
    Export,
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "tienda=info".into());
    let json = std::env::var("TIENDA_LOG_FORMAT").is_ok_and(|format| format == "json");

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = commands::Session::open(cli.data_dir)?;
    let output = commands::Output {
        fragments: cli.fragments,
    };

    match cli.command {
        Commands::Load => commands::storefront::load(&mut session, output)?,
        Commands::Cart { action } => match action {
            CartAction::Add {
                id,
                name,
                price,
                image,
            } => commands::storefront::add(&mut session, output, id, name, price, image)?,
            CartAction::Inc { id } => commands::storefront::increase(&mut session, output, &id)?,
            CartAction::Dec { id } => commands::storefront::decrease(&mut session, output, &id)?,
            CartAction::Remove { id } => commands::storefront::remove(&mut session, output, &id)?,
            CartAction::Show => commands::storefront::show(&session),
            CartAction::Open => commands::storefront::open(&mut session, output)?,
            CartAction::Close => commands::storefront::close(&mut session, output)?,
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Begin => commands::storefront::begin_checkout(&mut session, output)?,
            CheckoutAction::Confirm {
                name,
                email,
                phone,
                address,
            } => commands::storefront::confirm(
                &mut session,
                output,
                tienda_core::CustomerInfo::new(name, email, phone, address),
            )?,
        },
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(&session),
            OrdersAction::Show { id } => commands::orders::show(&mut session, output, id)?,
            OrdersAction::Status { id, status } => {
                commands::orders::change_status(&mut session, output, id, status)?;
            }
            OrdersAction::Delete { id, yes } => {
                commands::orders::delete(&mut session, output, id, yes)?;
            }
            OrdersAction::Export => commands::orders::export(&mut session, output)?,
        },
        Commands::Tab { name } => commands::orders::switch_tab(&mut session, output, name)?,
    }
    Ok(())
}
