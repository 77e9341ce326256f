//! Facet values available in a catalog snapshot.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Lowest and highest list price observed in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub min: Money,
    pub max: Money,
}

impl PriceBounds {
    /// Observe bounds over `products`. `None` for an empty catalog.
    pub fn observe(products: &[Product]) -> Option<Self> {
        let mut prices = products.iter().map(|p| p.price);
        let first = prices.next()?;
        let (min, max) = prices.fold((first, first), |(lo, hi), price| {
            (lo.min(price), hi.max(price))
        });
        Some(Self { min, max })
    }

    /// Clamp `value` into the bounds.
    pub fn clamp(&self, value: Money) -> Money {
        value.clamp(self.min, self.max)
    }
}

/// Selectable values for the size, color and price facets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetOptions {
    /// Distinct sizes, in first-seen order.
    pub sizes: Vec<String>,
    /// Distinct colors, in first-seen order.
    pub colors: Vec<String>,
    /// Observed price bounds.
    pub price_bounds: Option<PriceBounds>,
}

impl FacetOptions {
    /// Collect facet options from a product snapshot.
    pub fn from_products(products: &[Product]) -> Self {
        let mut sizes: Vec<String> = Vec::new();
        let mut colors: Vec<String> = Vec::new();

        for product in products {
            for size in &product.sizes {
                if !sizes.contains(size) {
                    sizes.push(size.clone());
                }
            }
            for color in &product.colors {
                if !colors.contains(color) {
                    colors.push(color.clone());
                }
            }
        }

        Self {
            sizes,
            colors,
            price_bounds: PriceBounds::observe(products),
        }
    }
}
