//! Catalog browsing commands.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::catalog::{Catalog, CategoryFilter, Product};

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::stock_badge;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    match args.command {
        CatalogCommand::List { category } => list(&catalog, &category, ctx),
        CatalogCommand::Categories => categories(&catalog, ctx),
    }
}

#[derive(Serialize)]
struct Listing<'a> {
    category: &'a str,
    products: Vec<&'a Product>,
}

fn list(catalog: &Catalog, category: &str, ctx: &Context) -> Result<()> {
    let filter = CategoryFilter::from_label(category);
    let products: Vec<&Product> = catalog.filter(&filter).collect();

    if ctx.output.is_json() {
        ctx.output.json(&Listing {
            category: filter.label(),
            products,
        });
        return Ok(());
    }

    ctx.output
        .header(&format!("{} - {}", ctx.config.store.name, filter.label()));

    if products.is_empty() {
        ctx.output.info("No products in this category");
        return Ok(());
    }

    print_products(&products, ctx);
    Ok(())
}

/// Print products as a table.
fn print_products(products: &[&Product], ctx: &Context) {
    let threshold = ctx.low_stock_threshold();
    let widths = [6, 28, 14, 10, 6, 0];
    ctx.output.table_row(
        &["ID", "NAME", "CATEGORY", "PRICE", "RATING", "STOCK"],
        &widths,
    );
    for product in products {
        let price = product.price.display();
        let rating = format!("{:.1}", product.rating);
        let stock = stock_badge(product, threshold);
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &product.category,
                &price,
                &rating,
                &stock,
            ],
            &widths,
        );
    }
}

fn categories(catalog: &Catalog, ctx: &Context) -> Result<()> {
    let labels = catalog.categories();

    if ctx.output.is_json() {
        ctx.output.json(&labels);
        return Ok(());
    }

    ctx.output.header("Categories");
    for label in &labels {
        let count = catalog.filter(&CategoryFilter::from_label(label)).count();
        ctx.output.list_item(&format!("{} ({})", label, count));
    }
    Ok(())
}
