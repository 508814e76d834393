//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod product;
pub mod shop;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products, optionally in one category.
    List {
        /// Category name ("All" lists everything).
        #[arg(short, long, default_value = "All")]
        category: String,
    },
    /// List categories present in the catalog.
    Categories,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,

    /// Quantity to price (clamped to stock).
    #[arg(short, long)]
    pub quantity: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    /// Operations applied in order: add:<id>, add:<id>x<n>, remove:<id>,
    /// set:<id>=<qty>, delete:<id>, clear.
    pub ops: Vec<String>,

    /// Apply ops to the raw store, without clamping to stock.
    #[arg(long)]
    pub unclamped: bool,
}

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Category to start browsing in.
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
