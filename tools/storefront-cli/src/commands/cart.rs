//! Scripted cart session.
//!
//! Applies a list of operations to a fresh cart and prints the resulting
//! order summary.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use serde::Serialize;
use storefront_commerce::cart::{CartStore, ClampOutcome, ClampingCartFacade, OrderSummary};
use storefront_commerce::session::Session;
use storefront_commerce::ProductId;

use super::CartArgs;
use crate::context::Context;
use crate::output::describe_outcome;

/// One cart operation from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOp {
    /// `add:<id>` or `add:<id>x<n>`.
    Add { id: ProductId, count: i64 },
    /// `remove:<id>`: one unit less.
    Remove { id: ProductId },
    /// `set:<id>=<qty>`.
    Set { id: ProductId, quantity: i64 },
    /// `delete:<id>`: drop the entry.
    Delete { id: ProductId },
    /// `clear`.
    Clear,
}

impl CartOp {
    /// Apply through the stock-checking facade.
    pub fn apply(&self, cart: &mut ClampingCartFacade<'_>) -> ClampOutcome {
        match self {
            CartOp::Add { id, count: 1 } => cart.increment(id),
            CartOp::Add { id, count } => cart.add_quantity(id, *count),
            CartOp::Remove { id } => cart.decrement(id),
            CartOp::Set { id, quantity } => cart.set_quantity(id, *quantity),
            CartOp::Delete { id } => cart.remove(id),
            CartOp::Clear => cart.clear(),
        }
    }

    /// Apply straight to the store, ignoring stock.
    pub fn apply_unclamped(&self, store: &mut CartStore) {
        match self {
            CartOp::Add { id, count: 1 } => store.add_to_cart(id),
            CartOp::Add { id, count } => {
                let quantity = store.quantity(id).saturating_add(*count);
                store.update_cart_quantity(id, quantity);
            }
            CartOp::Remove { id } => store.remove_from_cart(id),
            CartOp::Set { id, quantity } => store.update_cart_quantity(id, *quantity),
            CartOp::Delete { id } => store.update_cart_quantity(id, 0),
            CartOp::Clear => store.clear_cart(),
        }
    }

    fn target(&self) -> &str {
        match self {
            CartOp::Add { id, .. }
            | CartOp::Remove { id }
            | CartOp::Set { id, .. }
            | CartOp::Delete { id } => id.as_str(),
            CartOp::Clear => "cart",
        }
    }
}

impl FromStr for CartOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "clear" {
            return Ok(CartOp::Clear);
        }

        let (verb, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("expected <op>:<id>, got '{}'", s))?;
        let rest = rest.trim();
        if rest.is_empty() {
            return Err(format!("missing product id in '{}'", s));
        }

        match verb {
            "add" => {
                let (id, count) = match rest.rsplit_once('x') {
                    Some((id, n)) if !id.is_empty() => match n.parse::<i64>() {
                        Ok(count) if count > 0 => (id, count),
                        Ok(_) => return Err(format!("add count must be positive in '{}'", s)),
                        Err(_) => (rest, 1),
                    },
                    _ => (rest, 1),
                };
                Ok(CartOp::Add {
                    id: ProductId::new(id),
                    count,
                })
            }
            "remove" => Ok(CartOp::Remove {
                id: ProductId::new(rest),
            }),
            "delete" => Ok(CartOp::Delete {
                id: ProductId::new(rest),
            }),
            "set" => {
                let (id, quantity) = rest
                    .split_once('=')
                    .ok_or_else(|| format!("expected set:<id>=<qty>, got '{}'", s))?;
                let quantity = quantity
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| format!("invalid quantity in '{}'", s))?;
                Ok(CartOp::Set {
                    id: ProductId::new(id.trim()),
                    quantity,
                })
            }
            other => Err(format!("unknown cart operation '{}'", other)),
        }
    }
}

impl fmt::Display for CartOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartOp::Add { id, count: 1 } => write!(f, "add:{}", id),
            CartOp::Add { id, count } => write!(f, "add:{}x{}", id, count),
            CartOp::Remove { id } => write!(f, "remove:{}", id),
            CartOp::Set { id, quantity } => write!(f, "set:{}={}", id, quantity),
            CartOp::Delete { id } => write!(f, "delete:{}", id),
            CartOp::Clear => write!(f, "clear"),
        }
    }
}

#[derive(Serialize)]
struct StepReport {
    op: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<ClampOutcome>,
}

#[derive(Serialize)]
struct CartReport<'a> {
    session: &'a str,
    steps: Vec<StepReport>,
    summary: &'a OrderSummary,
}

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let ops = parse_ops(&args.ops)?;
    let mut session = Session::start(ctx.load_catalog()?);

    let mut steps = Vec::with_capacity(ops.len());
    for op in &ops {
        let result = if args.unclamped {
            op.apply_unclamped(session.cart_mut()?);
            None
        } else {
            let outcome = op.apply(&mut session.clamp()?);
            if matches!(outcome, ClampOutcome::UnknownProduct) {
                ctx.output.warn(&describe_outcome(&outcome, op.target()));
            } else if !matches!(op, CartOp::Clear) {
                ctx.output.debug(&describe_outcome(&outcome, op.target()));
            }
            Some(outcome)
        };
        steps.push(StepReport {
            op: op.to_string(),
            result,
        });
    }

    let session_id = session.id().to_string();
    let summary = session.summary()?;

    if ctx.output.is_json() {
        ctx.output.json(&CartReport {
            session: &session_id,
            steps,
            summary,
        });
    } else {
        ctx.output.header(&format!("{} - Cart", ctx.config.store.name));
        ctx.output.summary(summary);
    }

    session.end();
    Ok(())
}

fn parse_ops(raw: &[String]) -> Result<Vec<CartOp>> {
    let mut ops = Vec::with_capacity(raw.len());
    for item in raw {
        match item.parse::<CartOp>() {
            Ok(op) => ops.push(op),
            Err(e) => bail!("Invalid cart operation: {}", e),
        }
    }
    Ok(ops)
}
