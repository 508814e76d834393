//! Product detail command.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::cart::QuantitySelector;
use storefront_commerce::catalog::{Catalog, Product};
use storefront_commerce::{Money, ProductId};

use super::ProductArgs;
use crate::context::Context;
use crate::output::stock_badge;

/// Run the product command.
pub fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let product = catalog.require(&ProductId::new(args.id))?;

    let mut selector = QuantitySelector::for_product(product);
    if let Some(input) = &args.quantity {
        selector.set_from_input(input);
    }

    show(product, &selector, &catalog, ctx);
    Ok(())
}

#[derive(Serialize)]
struct Detail<'a> {
    product: &'a Product,
    specification: Vec<&'a str>,
    low_stock: bool,
    selected_quantity: i64,
    selected_subtotal: Money,
}

/// Print a product's detail view with the selector's quantity.
pub(crate) fn show(product: &Product, selector: &QuantitySelector, catalog: &Catalog, ctx: &Context) {
    let threshold = ctx.low_stock_threshold();

    if ctx.output.is_json() {
        ctx.output.json(&Detail {
            product,
            specification: product.specification_items(),
            low_stock: product.is_low_stock_below(threshold),
            selected_quantity: selector.quantity(),
            selected_subtotal: selector.line_subtotal(product),
        });
        return;
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Price", &product.price.display());
    ctx.output.kv(
        "Rating",
        &format!("{} {:.1}", product.star_bar(), product.rating),
    );
    ctx.output.kv("Stock", &stock_badge(product, threshold));
    if !product.image.is_empty() {
        ctx.output.kv("Image", &product.image);
    }

    if !product.description.is_empty() {
        println!();
        println!("  {}", product.description);
    }

    let specs = product.specification_items();
    if !specs.is_empty() {
        println!();
        ctx.output.kv("Specification", "");
        for item in specs {
            ctx.output.list_item(item);
        }
    }

    println!();
    ctx.output.kv(
        "Selected",
        &format!(
            "{} x {} = {}",
            selector.quantity(),
            product.price.display(),
            selector.line_subtotal(product).display()
        ),
    );
    ctx.output
        .debug(&format!("catalog version {}", catalog.version()));
}
