//! CLI command implementations.

pub mod add;
pub mod remove;
pub mod show;
pub mod update;

use anyhow::Result;
use cart_core::{report, Cart, CartError, Notice, ProductId};
use clap::Args;
use thiserror::Error;

use crate::context::Context;

/// Returned when the store rejected an operation. The notice has already
/// been shown, so `main` only sets the exit code.
#[derive(Debug, Error)]
#[error("cart operation rejected")]
pub struct Rejected;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product to add one unit of.
    pub product_id: ProductId,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product to remove from the cart.
    pub product_id: ProductId,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product whose quantity changes.
    pub product_id: ProductId,

    /// New quantity. Zero or less leaves the cart as it is.
    #[arg(allow_negative_numbers = true)]
    pub amount: i64,
}

const NOTHING_TO_CHANGE: &str = "Nothing to change.";

/// Show the notice for a rejected operation, or the new cart.
fn finish(ctx: &Context, result: Result<bool, CartError>, cart: &Cart, done: &str) -> Result<()> {
    let sink = |notice: Notice| ctx.output.notice(notice);

    let changed = report(result, &sink).ok_or(Rejected)?;
    let message = outcome_message(changed, done);
    if changed {
        ctx.output.success(message);
    } else {
        ctx.output.info(message);
    }
    ctx.output.cart(cart);
    Ok(())
}

fn outcome_message(changed: bool, done: &str) -> &str {
    if changed {
        done
    } else {
        NOTHING_TO_CHANGE
    }
}
