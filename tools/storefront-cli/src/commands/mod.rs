//! CLI command implementations.

pub mod browse;
pub mod categories;
pub mod config;
pub mod product;
pub mod ratings;
pub mod suggest;
pub mod vouchers;

use clap::{Args, Subcommand};
use storefront_discovery::search::SortKey;

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Only products in this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Lower price bound, e.g. "150000".
    #[arg(long)]
    pub min_price: Option<String>,

    /// Upper price bound.
    #[arg(long)]
    pub max_price: Option<String>,

    /// Search text matched against product names.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Size to include (repeatable).
    #[arg(long)]
    pub size: Vec<String>,

    /// Color to include (repeatable).
    #[arg(long)]
    pub color: Vec<String>,

    /// Star value to include (repeatable).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
    pub rating: Vec<u8>,

    /// Only discounted products.
    #[arg(long)]
    pub only_discount: bool,

    /// Sort order: latest, price_asc, price_desc, name_asc, name_desc.
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Page number.
    #[arg(short, long, default_value = "1")]
    pub page: usize,
}

/// Arguments for the suggest command.
#[derive(Args)]
pub struct SuggestArgs {
    /// Search text.
    pub text: String,
}

/// Arguments for the vouchers command.
#[derive(Args)]
pub struct VouchersArgs {
    /// Show vouchers for this user instead of the configured one.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Preview the discount against this order total.
    #[arg(long)]
    pub order_total: Option<String>,
}

/// Arguments for the ratings command.
#[derive(Args)]
pub struct RatingsArgs {
    /// Show only the N best rated products.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,

    /// Only show reviews with this star value.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub stars: Option<u8>,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
