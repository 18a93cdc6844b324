//! Show the current cart.

use anyhow::Result;

use crate::context::Context;

/// Run the show command.
pub async fn run(ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    ctx.output
        .debug(&format!("cart record {}", session.store.storage_key()));
    ctx.output.cart(&session.store.cart());
    Ok(())
}
