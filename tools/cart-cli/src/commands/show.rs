//! Print the current cart.

use anyhow::Result;

use crate::context::Context;

/// Run the show command.
pub async fn run(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    ctx.output.cart(store.cart());
    Ok(())
}
