//! Engine configuration.

use crate::catalog::BadgeThresholds;
use crate::error::DiscoveryError;
use crate::money::Currency;
use crate::search::{UnratedPolicy, DEFAULT_PAGE_SIZE, DEFAULT_SUGGESTION_LIMIT};
use serde::{Deserialize, Serialize};

/// Tunables for the discovery engine. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum autocomplete suggestions.
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Maximum related products on a detail page.
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,

    /// Number of "hot" categories to surface.
    #[serde(default = "default_hot_category_limit")]
    pub hot_category_limit: usize,

    /// Currency decimal amounts from the stores are read in.
    #[serde(default)]
    pub currency: Currency,

    /// Star filter behavior for products nobody has reviewed.
    #[serde(default)]
    pub unrated_policy: UnratedPolicy,

    /// Product badge thresholds.
    #[serde(default)]
    pub badges: BadgeThresholds,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_suggestion_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

fn default_related_limit() -> usize {
    4
}

fn default_hot_category_limit() -> usize {
    2
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            suggestion_limit: default_suggestion_limit(),
            related_limit: default_related_limit(),
            hot_category_limit: default_hot_category_limit(),
            currency: Currency::default(),
            unrated_policy: UnratedPolicy::default(),
            badges: BadgeThresholds::default(),
        }
    }
}

/// Longest new-arrival window accepted by [`DiscoveryConfig::validate`].
pub const MAX_NEW_ARRIVAL_DAYS: i64 = 3650;

impl DiscoveryConfig {
    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), DiscoveryError> {
        if self.page_size == 0 {
            return Err(DiscoveryError::InvalidConfig(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.suggestion_limit == 0 {
            return Err(DiscoveryError::InvalidConfig(
                "suggestion_limit must be at least 1".to_string(),
            ));
        }
        if !(0..=MAX_NEW_ARRIVAL_DAYS).contains(&self.badges.new_arrival_days) {
            return Err(DiscoveryError::InvalidConfig(format!(
                "badges.new_arrival_days must be between 0 and {}",
                MAX_NEW_ARRIVAL_DAYS
            )));
        }
        Ok(())
    }
}
