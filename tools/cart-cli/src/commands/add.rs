//! Add one unit of a product.

use anyhow::Result;

use super::{report, AddArgs};
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    session.store.add_product(args.id).await;
    report(&mut session, ctx, &format!("Added product {}", args.id))
}
