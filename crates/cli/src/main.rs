//! Go Marketplace CLI - Inspect and edit the saved cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gm-cart list
//!
//! # Show the cart in its saved JSON form
//! gm-cart list --json
//!
//! # Add a product (or one more unit of it)
//! gm-cart add --id p1 --title Shirt --image-url https://img.example/p1.png --price 10
//!
//! # Change quantities
//! gm-cart increment p1
//! gm-cart decrement p1
//! ```
//!
//! # Commands
//!
//! - `list` - Print the cart lines
//! - `summary` - Print item count and subtotal
//! - `add` - Add one unit of a product
//! - `increment` / `decrement` - Change a line's quantity by one
//! - `clear` - Remove every line
//! - `check` - Validate the saved cart and report errors instead of starting empty
//!
//! Storage location and key come from `CART_STORAGE_DIR` / `CART_STORAGE_KEY`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use go_marketplace_cart::{CartChange, CartStore, FileStore};
use rust_decimal::Decimal;

mod commands;
mod config;
mod telemetry;

use commands::CommandError;
use commands::cart::AddArgs;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "gm-cart")]
#[command(author, version, about = "Go Marketplace cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart lines
    List {
        /// Print the saved JSON form instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print item count and subtotal
    Summary,
    /// Validate the saved cart
    Check,
    #[command(flatten)]
    Edit(EditCommand),
}

#[derive(Subcommand)]
enum EditCommand {
    /// Add one unit of a product
    Add {
        /// Product id
        #[arg(long)]
        id: String,

        /// Product title
        #[arg(short, long)]
        title: String,

        /// Product image URL
        #[arg(short, long, default_value = "")]
        image_url: String,

        /// Unit price (e.g., 19.99)
        #[arg(short, long)]
        price: Decimal,
    },
    /// Add one unit to a product already in the cart
    Increment {
        /// Product id
        id: String,
    },
    /// Remove one unit of a product, dropping it at zero
    Decrement {
        /// Product id
        id: String,
    },
    /// Remove every line
    Clear,
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = CliConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = telemetry::init_sentry(&config);
    telemetry::init_tracing();

    let cli = Cli::parse();

    match run(cli, &config).await {
        Ok(output) => emit(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

#[allow(clippy::print_stdout)]
fn emit(output: &str) {
    println!("{output}");
}

async fn run(cli: Cli, config: &CliConfig) -> Result<String, CommandError> {
    let cart_config = &config.cart;

    match cli.command {
        Commands::Check => {
            let storage = FileStore::new(cart_config.storage_dir.clone());
            commands::report::check(&storage, &cart_config.storage_key).await
        }
        Commands::List { json } => {
            let store = CartStore::open_with_config(cart_config).await;
            commands::report::list(&store.snapshot(), json)
        }
        Commands::Summary => {
            let store = CartStore::open_with_config(cart_config).await;
            Ok(commands::report::summary(&store.snapshot()))
        }
        Commands::Edit(edit) => {
            let store = CartStore::open_with_config(cart_config).await;
            let change = apply(&store, edit)?;

            // The process exits right after; make sure the write landed.
            store.flush().await;

            Ok(format!(
                "{}\n{}",
                commands::cart::describe(&change),
                commands::report::summary(&store.snapshot())
            ))
        }
    }
}

fn apply(store: &CartStore, edit: EditCommand) -> Result<CartChange, CommandError> {
    Ok(match edit {
        EditCommand::Add {
            id,
            title,
            image_url,
            price,
        } => commands::cart::add(
            store,
            AddArgs {
                id,
                title,
                image_url,
                price,
            },
        )?,
        EditCommand::Increment { id } => commands::cart::increment(store, &id),
        EditCommand::Decrement { id } => commands::cart::decrement(store, &id),
        EditCommand::Clear => commands::cart::clear(store),
    })
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "gm-cart", "add", "--id", "p1", "--title", "Shirt", "--price", "10.50",
        ])
        .map_err(|e| e.to_string());
        assert!(matches!(
            cli,
            Ok(Cli {
                command: Commands::Edit(EditCommand::Add { ref id, price, .. })
            }) if id == "p1" && price == Decimal::new(1050, 2)
        ));
    }

    #[test]
    fn test_parse_decrement() {
        let cli = Cli::try_parse_from(["gm-cart", "decrement", "p1"]).map_err(|e| e.to_string());
        assert!(matches!(
            cli,
            Ok(Cli {
                command: Commands::Edit(EditCommand::Decrement { ref id })
            }) if id == "p1"
        ));
    }
}
