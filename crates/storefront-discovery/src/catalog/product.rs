//! Product types.

use crate::ids::{CategoryId, ProductId};
use crate::money::Money;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A product in the catalog snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// List price.
    pub price: Money,
    /// Sale price, only meaningful when below the list price.
    #[serde(default)]
    pub discount_price: Option<Money>,
    /// Category this product belongs to (None = uncategorized).
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Size labels, in display order.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Color labels, in display order.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Units sold.
    #[serde(default)]
    pub sold: u32,
    /// Whether merchandising pinned this product.
    #[serde(default)]
    pub is_featured: bool,
    /// Image URLs, first one is the cover.
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Create a product with only the required fields set.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            discount_price: None,
            category_id: None,
            sizes: Vec::new(),
            colors: Vec::new(),
            stock: 0,
            sold: 0,
            is_featured: false,
            image_urls: Vec::new(),
            created_at: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category_id: impl Into<CategoryId>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Set the sale price.
    pub fn with_discount_price(mut self, discount_price: Money) -> Self {
        self.discount_price = Some(discount_price);
        self
    }

    /// Set the available sizes.
    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the available colors.
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Set stock and sold counters.
    pub fn with_stock(mut self, stock: u32, sold: u32) -> Self {
        self.stock = stock;
        self.sold = sold;
        self
    }

    /// Set the creation time.
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// A product is discounted only when `0 < discount_price < price`.
    pub fn is_discounted(&self) -> bool {
        self.discount_price
            .map(|dp| dp.is_positive() && dp.amount_minor < self.price.amount_minor)
            .unwrap_or(false)
    }

    /// The price a buyer pays: the sale price when discounted, else the list price.
    pub fn effective_price(&self) -> Money {
        match self.discount_price {
            Some(dp) if self.is_discounted() => dp,
            _ => self.price,
        }
    }

    /// Savings as a percentage of the list price, when discounted.
    pub fn discount_percentage(&self) -> Option<f64> {
        if !self.is_discounted() {
            return None;
        }
        let savings = self.price.amount_minor - self.effective_price().amount_minor;
        Some((savings as f64 / self.price.amount_minor as f64) * 100.0)
    }

    /// Check if the product can be added to a cart.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Cover image, if any.
    pub fn cover_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Pick the display badge for this product at `now`.
    pub fn badge(&self, now: DateTime<Utc>, thresholds: &BadgeThresholds) -> Option<ProductBadge> {
        if self.sold > thresholds.best_seller_sold {
            return Some(ProductBadge::BestSeller);
        }
        if self.stock <= thresholds.low_stock {
            return Some(ProductBadge::LowStock);
        }
        let created = self.created_at?;
        // A window too large for chrono disables the badge.
        let window = Duration::try_days(thresholds.new_arrival_days)?;
        if now - created < window {
            return Some(ProductBadge::NewArrival);
        }
        None
    }
}

/// Merchandising badge shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductBadge {
    /// Sold more than the best-seller threshold.
    BestSeller,
    /// Stock at or below the low-stock threshold.
    LowStock,
    /// Created within the new-arrival window.
    NewArrival,
}

impl ProductBadge {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductBadge::BestSeller => "Best seller",
            ProductBadge::LowStock => "Almost gone",
            ProductBadge::NewArrival => "New arrival",
        }
    }
}

/// Thresholds that decide which badge a product earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeThresholds {
    /// Best seller when `sold` is strictly above this.
    #[serde(default = "default_best_seller_sold")]
    pub best_seller_sold: u32,
    /// Low stock when `stock` is at or below this.
    #[serde(default = "default_low_stock")]
    pub low_stock: u32,
    /// New arrival when created less than this many days ago.
    #[serde(default = "default_new_arrival_days")]
    pub new_arrival_days: i64,
}

fn default_best_seller_sold() -> u32 {
    20
}

fn default_low_stock() -> u32 {
    3
}

fn default_new_arrival_days() -> i64 {
    7
}

impl Default for BadgeThresholds {
    fn default() -> Self {
        Self {
            best_seller_sold: default_best_seller_sold(),
            low_stock: default_low_stock(),
            new_arrival_days: default_new_arrival_days(),
        }
    }
}

/// Products sharing `product`'s category, excluding `product` itself.
///
/// Uncategorized products have no relatives.
pub fn related_products<'a>(
    product: &Product,
    products: &'a [Product],
    limit: usize,
) -> Vec<&'a Product> {
    let Some(category) = product.category_id.as_ref() else {
        return Vec::new();
    };
    products
        .iter()
        .filter(|p| p.id != product.id && p.category_id.as_ref() == Some(category))
        .take(limit)
        .collect()
}
