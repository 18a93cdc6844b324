//! Delete the persisted cart record.

use anyhow::{Context as _, Result};
use rocket_storage::Storage;

use super::ClearArgs;
use crate::context::Context;

/// Run the clear-storage command.
pub async fn run(args: ClearArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.storage()?;
    let key = ctx.config.store.cart_key();

    if !storage.exists(&key)? {
        ctx.output.success("Nothing to clear");
        return Ok(());
    }

    storage
        .delete(&key)
        .with_context(|| format!("Failed to delete {}", key))?;
    tracing::info!(%key, "cart record deleted");
    ctx.output.success(&format!("Cleared {}", key));

    if args.prune {
        // remove_dir refuses non-empty directories.
        if std::fs::remove_dir(storage.dir()).is_ok() {
            ctx.output
                .debug(&format!("removed {}", storage.dir().display()));
        }
    }

    Ok(())
}
