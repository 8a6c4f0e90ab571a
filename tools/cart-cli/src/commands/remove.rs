//! Remove a product from the cart.

use anyhow::Result;

use super::{finish, RemoveArgs};
use crate::context::Context;

/// Run the remove command.
pub async fn run(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let result = store.remove(args.product_id);

    let done = format!("Removed product {}", args.product_id);
    finish(ctx, result, store.cart(), &done)
}
