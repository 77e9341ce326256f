//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_discovery::config::DiscoveryConfig;

/// Config file names searched for, in order, up the directory tree.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the snapshot files live and who is browsing.
    #[serde(default)]
    pub data: DataConfig,

    /// Engine settings.
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Snapshot file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Products file.
    #[serde(default = "default_products")]
    pub products: String,

    /// Categories file.
    #[serde(default = "default_categories")]
    pub categories: String,

    /// Reviews file.
    #[serde(default = "default_reviews")]
    pub reviews: String,

    /// Vouchers file.
    #[serde(default = "default_vouchers")]
    pub vouchers: String,

    /// Signed-in user. Anonymous when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

fn default_products() -> String {
    "data/products.json".to_string()
}

fn default_categories() -> String {
    "data/categories.json".to_string()
}

fn default_reviews() -> String {
    "data/reviews.json".to_string()
}

fn default_vouchers() -> String {
    "data/vouchers.json".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            products: default_products(),
            categories: default_categories(),
            reviews: default_reviews(),
            vouchers: default_vouchers(),
            user_id: None,
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront CLI configuration

[data]
products = "data/products.json"
categories = "data/categories.json"
reviews = "data/reviews.json"
vouchers = "data/vouchers.json"
# user_id = "your-user-id"

[discovery]
page_size = 8
suggestion_limit = 6
related_limit = 4
hot_category_limit = 2
currency = "VND"
# "exclude" hides unreviewed products under a star filter,
# "treat_as_zero" lets them match the 0 star value.
unrated_policy = "exclude"

[discovery.badges]
best_seller_sold = 20
low_stock = 3
new_arrival_days = 7
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_discovery::search::UnratedPolicy;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: CliConfig = toml::from_str(
            r#"
            [data]
            user_id = "u1"

            [discovery]
            page_size = 4
            unrated_policy = "treat_as_zero"
            "#,
        )
        .unwrap();
        assert_eq!(config.data.user_id.as_deref(), Some("u1"));
        assert_eq!(config.data.products, "data/products.json");
        assert_eq!(config.discovery.page_size, 4);
        assert_eq!(config.discovery.unrated_policy, UnratedPolicy::TreatAsZero);
    }

    #[test]
    fn test_load_json() {
        let path = std::env::temp_dir().join(format!("storefront-cli-{}.json", std::process::id()));
        let mut config = CliConfig::default();
        config.data.user_id = Some("u9".to_string());
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = CliConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
