//! Product catalog module.
//!
//! Contains types for products, categories, and the facet values a catalog
//! snapshot offers.

mod category;
mod facets;
mod product;

pub use category::{hot_categories, Category};
pub use facets::{FacetOptions, PriceBounds};
pub use product::{related_products, BadgeThresholds, Product, ProductBadge};
