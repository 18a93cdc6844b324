//! CLI command implementations.

pub mod add;
pub mod clear;
pub mod remove;
pub mod show;
pub mod update;

use anyhow::{bail, Result};
use clap::Args;
use rocket_cart::ProductId;

use crate::context::{Context, Session};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product id.
    pub id: ProductId,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product id.
    pub id: ProductId,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product id.
    pub id: ProductId,

    /// New amount. Amounts below 1 are ignored.
    #[arg(allow_hyphen_values = true)]
    pub amount: i64,
}

/// Arguments for the clear-storage command.
#[derive(Args)]
pub struct ClearArgs {
    /// Also remove the storage directory when it is left empty.
    #[arg(long)]
    pub prune: bool,
}

/// Print what an operation left behind: its notices, then the cart.
///
/// Fails when the operation was rejected so the exit code reflects it.
fn report(session: &mut Session, ctx: &Context, done: &str) -> Result<()> {
    let notices = session.drain_notices();
    for notice in &notices {
        ctx.output.notice(*notice);
    }

    let cart = session.store.cart();
    if notices.is_empty() {
        ctx.output.success(done);
    }
    ctx.output.cart(&cart);

    if let Some(first) = notices.first() {
        bail!("{}", first.message());
    }
    Ok(())
}
