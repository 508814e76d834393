//! Output formatting for the CLI.

use console::style;
use storefront_commerce::catalog::Product;
use storefront_commerce::cart::{ClampOutcome, OrderSummary};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", pad_columns(cols, widths));
    }

    /// Print the line items and totals of an order summary.
    pub fn summary(&self, summary: &OrderSummary) {
        if self.json {
            return;
        }
        if summary.is_empty() {
            self.info("Your cart is empty");
        } else {
            let widths = [6, 28, 10, 5, 10];
            self.table_row(&["ID", "PRODUCT", "PRICE", "QTY", "SUBTOTAL"], &widths);
            for item in &summary.line_items {
                let price = item.product.price.display();
                let quantity = item.cart_quantity.to_string();
                let subtotal = item.line_subtotal.display();
                self.table_row(
                    &[
                        item.product.id.as_str(),
                        &item.product.name,
                        &price,
                        &quantity,
                        &subtotal,
                    ],
                    &widths,
                );
            }
        }
        println!();
        self.kv("Items", &summary.item_count.to_string());
        self.kv("Subtotal", &summary.subtotal.display());
        self.kv("Tax (10%)", &summary.tax.display());
        println!("  {}: {}", style("Total").bold(), style(summary.total.display()).bold());
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn pad_columns(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths.iter())
        .map(|(col, width)| format!("{:width$}", col, width = width))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Stock badge for a product.
pub fn stock_badge(product: &Product, low_stock_threshold: i64) -> String {
    if product.is_out_of_stock() {
        style("out of stock").red().to_string()
    } else if product.is_low_stock_below(low_stock_threshold) {
        style(format!("only {} left", product.quantity))
            .yellow()
            .to_string()
    } else {
        style(format!("{} in stock", product.quantity))
            .green()
            .to_string()
    }
}

/// Human-readable description of a clamped cart change.
pub fn describe_outcome(outcome: &ClampOutcome, id: &str) -> String {
    match outcome {
        ClampOutcome::Applied { quantity } => format!("{} now at quantity {}", id, quantity),
        ClampOutcome::Clamped { requested, quantity } => format!(
            "{} requested {} but only {} in stock, set to {}",
            id, requested, quantity, quantity
        ),
        ClampOutcome::Removed => format!("{} removed from cart", id),
        ClampOutcome::AtStockLimit { quantity } => {
            format!("{} already at stock limit ({})", id, quantity)
        }
        ClampOutcome::UnknownProduct => format!("{} is not in the catalog", id),
        ClampOutcome::Unchanged => format!("{} unchanged", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_columns() {
        assert_eq!(pad_columns(&["a", "bc"], &[3, 2]), "a    bc");
    }

    #[test]
    fn test_describe_outcome() {
        assert_eq!(
            describe_outcome(&ClampOutcome::Applied { quantity: 2 }, "1"),
            "1 now at quantity 2"
        );
        assert_eq!(
            describe_outcome(&ClampOutcome::Clamped { requested: 9, quantity: 2 }, "4"),
            "4 requested 9 but only 2 in stock, set to 2"
        );
        assert_eq!(describe_outcome(&ClampOutcome::UnknownProduct, "x"), "x is not in the catalog");
    }
}
