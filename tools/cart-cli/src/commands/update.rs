//! Set a product's amount.

use anyhow::Result;
use rocket_cart::UpdateProductAmount;

use super::{report, UpdateArgs};
use crate::context::Context;

/// Run the update command.
pub async fn run(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;

    if args.amount < 1 {
        ctx.output
            .warn(&format!("Amount {} ignored; use `cart remove` to delete a line", args.amount));
        ctx.output.cart(&session.store.cart());
        return Ok(());
    }

    session
        .store
        .update_product_amount(UpdateProductAmount {
            product_id: args.id,
            amount: args.amount,
        })
        .await;

    report(
        &mut session,
        ctx,
        &format!("Product {} set to {}", args.id, args.amount),
    )
}
