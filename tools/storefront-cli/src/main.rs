//! Storefront CLI - Browse a storefront catalog snapshot from the terminal.
//!
//! Commands:
//! - `storefront browse` - Filter, sort and page through products
//! - `storefront suggest` - Autocomplete suggestions for a search text
//! - `storefront vouchers` - Vouchers the current user can use
//! - `storefront ratings` - Average rating per reviewed product
//! - `storefront product` - Product details, reviews and related products
//! - `storefront categories` - Categories with product counts
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    BrowseArgs, CategoriesArgs, ConfigArgs, ProductArgs, RatingsArgs, SuggestArgs, VouchersArgs,
};

/// Storefront CLI - Browse products, ratings and vouchers
#[derive(Parser)]
#[command(name = "storefront")]
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
    /// Filter, sort and page through products
    Browse(BrowseArgs),

    /// Show autocomplete suggestions for a search text
    Suggest(SuggestArgs),

    /// List vouchers the current user can use
    Vouchers(VouchersArgs),

    /// Show the average rating of every reviewed product
    Ratings(RatingsArgs),

    /// Show one product with its reviews
    Product(ProductArgs),

    /// List categories
    Categories(CategoriesArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.json);

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
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Suggest(args) => commands::suggest::run(args, &ctx).await,
        Commands::Vouchers(args) => commands::vouchers::run(args, &ctx).await,
        Commands::Ratings(args) => commands::ratings::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
