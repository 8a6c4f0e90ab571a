//! Add one unit of a product.

use anyhow::Result;

use super::{finish, AddArgs};
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    let spinner = ctx.output.spinner(&format!("Checking stock for product {}...", args.product_id));
    let result = store.add(args.product_id).await;
    spinner.finish_and_clear();

    let done = format!("Added product {}", args.product_id);
    finish(ctx, result, store.cart(), &done)
}
