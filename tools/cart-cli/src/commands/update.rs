//! Set the quantity of a product already in the cart.

use anyhow::Result;

use super::{finish, UpdateArgs};
use crate::context::Context;

/// Run the update command.
pub async fn run(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    let spinner = ctx.output.spinner(&format!("Checking stock for product {}...", args.product_id));
    let result = store.update_amount(args.product_id, args.amount).await;
    spinner.finish_and_clear();

    let done = format!("Product {} quantity set to {}", args.product_id, args.amount);
    finish(ctx, result, store.cart(), &done)
}
