//! Remove a product line.

use anyhow::Result;

use super::{report, RemoveArgs};
use crate::context::Context;

/// Run the remove command.
pub async fn run(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    session.store.remove_product(args.id).await;
    report(&mut session, ctx, &format!("Removed product {}", args.id))
}
