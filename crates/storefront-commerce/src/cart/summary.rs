//! Line items and order summary derived from a cart and a catalog.

use rust_decimal::Decimal;
use serde::Serialize;

use super::store::CartSnapshot;
use crate::catalog::{Catalog, Product};
use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// Tax applied to the subtotal: 10%.
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// A cart entry resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    /// The catalog product.
    pub product: Product,
    /// Quantity requested in the cart.
    pub cart_quantity: i64,
    /// `price * cart_quantity`.
    pub line_subtotal: Money,
}

impl LineItem {
    fn new(product: &Product, cart_quantity: i64) -> Self {
        Self {
            product: product.clone(),
            cart_quantity,
            line_subtotal: product.price_for(cart_quantity),
        }
    }

    /// Whether the requested quantity already uses all available stock.
    pub fn at_stock_limit(&self) -> bool {
        self.cart_quantity >= self.product.quantity
    }
}

/// Totals for the order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    /// Resolved line items in cart order.
    pub line_items: Vec<LineItem>,
    /// Sum of line subtotals.
    pub subtotal: Money,
    /// `subtotal * TAX_RATE`, unrounded.
    pub tax: Money,
    /// `subtotal + tax`.
    pub total: Money,
    /// Sum of every cart quantity, including entries missing from the catalog.
    pub item_count: i64,
}

impl OrderSummary {
    /// Check if nothing resolved against the catalog.
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Number of resolved line items.
    pub fn line_count(&self) -> usize {
        self.line_items.len()
    }
}

/// Join cart entries against the catalog, in cart order.
///
/// Entries whose product is missing from the catalog are skipped. The cart
/// itself is left untouched, so a stale entry reappears if its product comes
/// back.
pub fn resolve_line_items(cart: CartSnapshot<'_>, catalog: &Catalog) -> Vec<LineItem> {
    cart.iter()
        .filter_map(|(product_id, quantity)| match catalog.get(product_id) {
            Some(product) => Some(LineItem::new(product, quantity)),
            None => {
                tracing::debug!(product_id = %product_id, quantity, "skipping stale cart entry");
                None
            }
        })
        .collect()
}

/// Compute the order summary, failing if line items mix currencies or an
/// amount does not fit in a decimal.
pub fn try_compute_summary(
    cart: CartSnapshot<'_>,
    catalog: &Catalog,
) -> Result<OrderSummary, CommerceError> {
    let line_items = resolve_line_items(cart, catalog);
    let currency = summary_currency(&line_items, catalog);

    let mut subtotal = Money::zero(currency);
    for item in &line_items {
        if item.line_subtotal.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: item.line_subtotal.currency.code().to_string(),
            });
        }
        subtotal = item
            .product
            .price
            .checked_multiply(item.cart_quantity)
            .and_then(|line| subtotal.try_add(&line))
            .ok_or_else(|| overflow(&item.product))?;
    }

    let tax = subtotal
        .checked_multiply_rate(TAX_RATE)
        .ok_or_else(|| CommerceError::AmountOverflow("order tax".to_string()))?;
    let total = subtotal
        .try_add(&tax)
        .ok_or_else(|| CommerceError::AmountOverflow("order total".to_string()))?;

    Ok(OrderSummary {
        line_items,
        subtotal,
        tax,
        total,
        item_count: cart.item_count(),
    })
}

/// Compute the order summary.
///
/// Line items priced in a different currency than the first one are left out
/// of the totals (and logged); single-currency catalogs never hit that path.
/// Amounts too large for a decimal saturate instead of failing.
pub fn compute_summary(cart: CartSnapshot<'_>, catalog: &Catalog) -> OrderSummary {
    let line_items = resolve_line_items(cart, catalog);
    let currency = summary_currency(&line_items, catalog);

    let mut subtotal = Money::zero(currency);
    for item in &line_items {
        if item.line_subtotal.currency != currency {
            tracing::warn!(
                product_id = %item.product.id,
                currency = %item.line_subtotal.currency,
                expected = %currency,
                "line item currency differs from order currency; left out of totals"
            );
            continue;
        }
        match subtotal.try_add(&item.line_subtotal) {
            Some(sum) => subtotal = sum,
            None => {
                tracing::warn!(product_id = %item.product.id, "order subtotal overflowed; saturated");
                subtotal = subtotal.saturating_add(&item.line_subtotal);
            }
        }
    }

    let tax = subtotal.multiply_rate(TAX_RATE);
    OrderSummary {
        line_items,
        subtotal,
        tax,
        total: subtotal.saturating_add(&tax),
        item_count: cart.item_count(),
    }
}

fn overflow(product: &Product) -> CommerceError {
    CommerceError::AmountOverflow(format!("line subtotal for product {}", product.id))
}

fn summary_currency(line_items: &[LineItem], catalog: &Catalog) -> Currency {
    line_items
        .first()
        .map(|item| item.line_subtotal.currency)
        .unwrap_or_else(|| catalog.currency())
}

/// Memoized summary, recomputed when the cart revision or catalog version
/// changes.
#[derive(Debug, Clone, Default)]
pub struct SummaryCache {
    cached: Option<((u64, u64), OrderSummary)>,
}

impl SummaryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary for the current inputs, reusing the last one when unchanged.
    pub fn get(&mut self, cart: CartSnapshot<'_>, catalog: &Catalog) -> &OrderSummary {
        let key = (cart.revision(), catalog.version());
        let stale = !matches!(&self.cached, Some((cached_key, _)) if *cached_key == key);
        if stale {
            tracing::trace!(cart_revision = key.0, catalog_version = key.1, "recomputing order summary");
            self.cached = None;
        }
        let (_, summary) = self
            .cached
            .get_or_insert_with(|| (key, compute_summary(cart, catalog)));
        summary
    }

    /// Drop the cached summary.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
