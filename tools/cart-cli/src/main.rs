//! Cart CLI - drive the Rocket storefront cart from the command line.
//!
//! Commands:
//! - `cart show` - Print the persisted cart
//! - `cart add <id>` - Add one unit of a product
//! - `cart remove <id>` - Remove a product line
//! - `cart update <id> <amount>` - Set a product's amount
//! - `cart clear-storage` - Delete the persisted cart record

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, ClearArgs, RemoveArgs, UpdateArgs};

/// Cart CLI - manage the storefront cart against an inventory service
#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    Show,

    /// Add one unit of a product
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(RemoveArgs),

    /// Set the amount of a product in the cart
    Update(UpdateArgs),

    /// Delete the persisted cart
    ClearStorage(ClearArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "error" }));

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Show => commands::show::run(&ctx).await,
        Commands::Add(args) => commands::add::run(args, &ctx).await,
        Commands::Remove(args) => commands::remove::run(args, &ctx).await,
        Commands::Update(args) => commands::update::run(args, &ctx).await,
        Commands::ClearStorage(args) => commands::clear::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update() {
        let cli = Cli::try_parse_from(["cart", "--json", "update", "3", "2"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Update(args) => {
                assert_eq!(args.id.get(), 3);
                assert_eq!(args.amount, 2);
            }
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn test_parse_negative_amount() {
        let cli = Cli::try_parse_from(["cart", "update", "3", "-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Update(UpdateArgs { amount: -1, .. })));
    }

    #[test]
    fn test_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["cart", "add", "shoe"]).is_err());
    }

    #[test]
    fn test_clear_storage_name() {
        let cli = Cli::try_parse_from(["cart", "clear-storage", "--prune"]).unwrap();
        assert!(matches!(cli.command, Commands::ClearStorage(ClearArgs { prune: true })));
    }
}
