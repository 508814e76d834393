//! Interactive shopping session.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input, Select};
use storefront_commerce::cart::{ClampOutcome, QuantitySelector};
use storefront_commerce::catalog::{CategoryFilter, Product, ProductDraft, KNOWN_CATEGORIES};
use storefront_commerce::session::Session;
use storefront_commerce::{CommerceError, ProductId};

use super::product;
use super::ShopArgs;
use crate::context::Context;
use crate::output::{describe_outcome, stock_badge};

const MAIN_MENU: [&str; 7] = [
    "Browse products",
    "Change category",
    "View cart",
    "Add a product",
    "Clear cart",
    "Order summary",
    "Quit",
];

/// Run the shop command.
pub fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("The shop command is interactive and does not support --json");
    }

    let mut session = Session::start(ctx.load_catalog()?);
    let mut filter = args
        .category
        .as_deref()
        .map(CategoryFilter::from_label)
        .unwrap_or_default();

    ctx.output.header(&format!("Welcome to {}", ctx.config.store.name));
    ctx.output.debug(&format!("session {}", session.id()));

    loop {
        let item_count = session.cart()?.item_count();
        let choice = Select::new()
            .with_prompt(format!("[{} | cart: {}]", filter.label(), item_count))
            .items(&MAIN_MENU)
            .default(0)
            .interact()?;

        match choice {
            0 => browse(&mut session, &filter, ctx)?,
            1 => filter = choose_category(&session, &filter)?,
            2 => edit_cart(&mut session, ctx)?,
            3 => add_product(&mut session, ctx)?,
            4 => {
                if session.clamp()?.clear().changed() {
                    ctx.output.success("Cart cleared");
                } else {
                    ctx.output.info("Cart is already empty");
                }
            }
            5 => {
                ctx.output.header("Order summary");
                ctx.output.summary(session.summary()?);
            }
            _ => {
                if item_count > 0
                    && !Confirm::new()
                        .with_prompt("Leave and discard your cart?")
                        .default(false)
                        .interact()?
                {
                    continue;
                }
                break;
            }
        }
    }

    session.end();
    ctx.output.info("Goodbye");
    Ok(())
}

fn choose_category(session: &Session, current: &CategoryFilter) -> Result<CategoryFilter> {
    let labels = session.catalog().categories();
    let default = labels
        .iter()
        .position(|l| l == current.label())
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Category")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(labels
        .get(selection)
        .map(|label| CategoryFilter::from_label(label))
        .unwrap_or_default())
}

fn browse(session: &mut Session, filter: &CategoryFilter, ctx: &Context) -> Result<()> {
    let threshold = ctx.low_stock_threshold();
    let products: Vec<Product> = session.catalog().filter(filter).cloned().collect();
    if products.is_empty() {
        ctx.output.info("No products in this category");
        return Ok(());
    }

    let mut items: Vec<String> = products
        .iter()
        .map(|p| {
            format!(
                "{:28} {:>10}  {}",
                p.name,
                p.price.display(),
                stock_badge(p, threshold)
            )
        })
        .collect();
    items.push("Back".to_string());

    let selection = Select::new()
        .with_prompt("Product")
        .items(&items)
        .default(0)
        .interact()?;

    match products.get(selection) {
        Some(product) => product_detail(session, product, ctx),
        None => Ok(()),
    }
}

fn product_detail(session: &mut Session, product: &Product, ctx: &Context) -> Result<()> {
    let mut selector = QuantitySelector::for_product(product);

    loop {
        product::show(product, &selector, session.catalog(), ctx);
        if product.is_out_of_stock() {
            ctx.output.warn("This product is out of stock");
            return Ok(());
        }

        let actions = [
            format!("Add {} to cart", selector.quantity()),
            "+1".to_string(),
            "-1".to_string(),
            "Enter quantity".to_string(),
            "Back".to_string(),
        ];
        let choice = Select::new()
            .with_prompt("Action")
            .items(&actions)
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let outcome = session
                    .clamp()?
                    .add_quantity(&product.id, selector.quantity());
                report(&outcome, &product.name, ctx);
                return Ok(());
            }
            1 => {
                if !selector.can_increment() {
                    ctx.output.warn("No more stock available");
                }
                selector.increment();
            }
            2 => selector.decrement(),
            3 => {
                let input: String = Input::new()
                    .with_prompt(format!("Quantity (1-{})", product.quantity))
                    .default(selector.quantity().to_string())
                    .interact_text()?;
                selector.set_from_input(&input);
            }
            _ => return Ok(()),
        }
    }
}

fn edit_cart(session: &mut Session, ctx: &Context) -> Result<()> {
    loop {
        let summary = session.summary()?;
        ctx.output.header("Cart");
        ctx.output.summary(summary);
        if summary.is_empty() {
            return Ok(());
        }

        let lines: Vec<(ProductId, String, i64)> = summary
            .line_items
            .iter()
            .map(|item| {
                (
                    item.product.id.clone(),
                    item.product.name.clone(),
                    item.product.quantity,
                )
            })
            .collect();

        let mut items: Vec<String> = lines
            .iter()
            .map(|(_, name, _)| name.clone())
            .collect();
        items.push("Back".to_string());

        let selection = Select::new()
            .with_prompt("Edit item")
            .items(&items)
            .default(0)
            .interact()?;
        let Some((id, name, stock)) = lines.get(selection) else {
            return Ok(());
        };

        let action = Select::new()
            .with_prompt(name.as_str())
            .items(&["+1", "-1", "Set quantity", "Remove", "Back"])
            .default(0)
            .interact()?;

        let outcome = match action {
            0 => session.clamp()?.increment(id),
            1 => session.clamp()?.decrement(id),
            2 => {
                let current = session.cart()?.quantity(id);
                let input: String = Input::new()
                    .with_prompt(format!("Quantity (0 removes, max {})", stock))
                    .default(current.to_string())
                    .interact_text()?;
                match input.trim().parse::<i64>() {
                    Ok(quantity) => session.clamp()?.set_quantity(id, quantity),
                    Err(_) => {
                        ctx.output.warn(&format!("Not a number: {}", input.trim()));
                        continue;
                    }
                }
            }
            3 => session.clamp()?.remove(id),
            _ => continue,
        };
        report(&outcome, name, ctx);
    }
}

fn add_product(session: &mut Session, ctx: &Context) -> Result<()> {
    ctx.output.header("Add a product");
    let mut draft = ProductDraft::default();

    draft.name = prompt("Name", &draft.name)?;
    let category = Select::new()
        .with_prompt("Category")
        .items(&KNOWN_CATEGORIES)
        .default(
            KNOWN_CATEGORIES
                .iter()
                .position(|c| *c == draft.category)
                .unwrap_or(0),
        )
        .interact()?;
    if let Some(name) = KNOWN_CATEGORIES.get(category) {
        draft.category = (*name).to_string();
    }
    draft.price = prompt("Price", &draft.price)?;
    draft.quantity = prompt("Quantity in stock", &draft.quantity)?;
    draft.image = prompt("Image URL", &draft.image)?;
    draft.description = prompt("Description", &draft.description)?;
    draft.specification = prompt("Specification (comma separated)", &draft.specification)?;
    draft.rating = prompt("Rating (0-5)", &draft.rating)?;

    match session.add_product(&draft) {
        Ok(id) => {
            ctx.output
                .success(&format!("Added {} with id {}", draft.name.trim(), id));
            Ok(())
        }
        Err(CommerceError::InvalidProduct(errors)) => {
            ctx.output.warn("Product not added:");
            for (field, message) in errors.iter() {
                ctx.output.list_item(&format!("{}: {}", field, message));
            }
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn prompt(label: &str, initial: &str) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(label)
        .allow_empty(true);
    if !initial.is_empty() {
        input = input.default(initial.to_string());
    }
    Ok(input.interact_text()?)
}

fn report(outcome: &ClampOutcome, name: &str, ctx: &Context) {
    let message = describe_outcome(outcome, name);
    match outcome {
        ClampOutcome::Applied { .. } | ClampOutcome::Removed => ctx.output.success(&message),
        ClampOutcome::Unchanged => ctx.output.info(&message),
        _ => ctx.output.warn(&message),
    }
}
