//! Catalog Keeper CLI - manage a local product catalog.
//!
//! # Usage
//!
//! ```bash
//! # Start a session
//! ck login --email eve.holt@reqres.in --password cityslicka
//!
//! # Add a product
//! ck add --name "Pro Cable" --price 199 --image file:///photos/cable.jpg --category Electronic
//!
//! # List products, optionally filtered
//! ck list --category Electronic --search pro
//!
//! # Remove a product by id
//! ck remove 1718000000000
//!
//! # End the session (products are kept)
//! ck logout
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `status` - Manage the session
//! - `add` / `list` / `remove` - Manage products (require a session)
//!
//! Configuration is read from the environment; see `catalog_keeper::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use catalog_keeper::CatalogConfig;
use catalog_keeper::query::CatalogQuery;
use catalog_keeper_core::{Category, CategorySelector, ProductDraft, ProductId};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ck")]
#[command(author, version, about = "Catalog Keeper product catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and start a session
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// End the session
    Logout,
    /// Show whether a session is active
    Status,
    /// Add a product
    Add {
        /// Product name, unique ignoring case
        #[arg(short, long)]
        name: String,

        /// Price as entered
        #[arg(short, long)]
        price: String,

        /// Image reference
        #[arg(short, long)]
        image: String,

        /// Category (`Uncategorized`, `Accessory`, `Electronic`, `Product`)
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// List products
    List {
        /// Category to show, or `All`
        #[arg(short, long, default_value = CategorySelector::ALL)]
        category: String,

        /// Case-insensitive name search
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Remove a product by id
    Remove {
        /// Product id
        id: ProductId,
    },
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "catalog_keeper=info,ck=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CatalogConfig::from_env()?;
    let gate = commands::open_gate(&config).await?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(&config, &gate, &email, &password).await?;
        }
        Commands::Logout => commands::session::logout(&gate).await?,
        Commands::Status => {
            commands::session::status(&gate).await?;
        }
        Commands::Add {
            name,
            price,
            image,
            category,
        } => {
            let mut draft = ProductDraft::new(name, price, image);
            draft.category = category;
            commands::products::add(&gate, draft).await?;
        }
        Commands::List { category, search } => {
            let query = CatalogQuery::new()
                .with_category(CategorySelector::parse(&category))
                .with_search(search);
            commands::products::list(&gate, &query).await?;
        }
        Commands::Remove { id } => {
            commands::products::remove(&gate, id).await?;
        }
    }
    Ok(())
}
