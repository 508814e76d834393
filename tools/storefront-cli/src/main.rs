//! Storefront CLI - browse the catalog and drive a cart session.
//!
//! Commands:
//! - `storefront catalog` - List products and categories
//! - `storefront product` - Show a product's detail view
//! - `storefront cart` - Apply cart operations and print the order summary
//! - `storefront shop` - Interactive shopping session
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CartArgs, CatalogArgs, ConfigArgs, ProductArgs, ShopArgs};

/// Storefront - browse products and manage a shopping cart
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products and categories
    Catalog(CatalogArgs),

    /// Show product details
    Product(ProductArgs),

    /// Apply cart operations and print the order summary
    Cart(CartArgs),

    /// Start an interactive shopping session
    Shop(ShopArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    logging::init(&ctx.config.logging, cli.verbose);
    tracing::debug!(config = ?ctx.config_path, "configuration loaded");

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Product(args) => commands::product::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Shop(args) => commands::shop::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
