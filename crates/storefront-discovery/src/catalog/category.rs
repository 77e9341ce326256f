//! Category types for product organization.

use std::collections::HashMap;

use crate::catalog::Product;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category. The storefront catalog is flat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Category image URL.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Category {
    /// Create a new category.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: None,
        }
    }

    /// Set the image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// Rank categories by total units sold, best first, keeping at most `limit`.
///
/// Ties keep the order in which the categories first appear in `products`.
/// Uncategorized products don't count toward any category.
pub fn hot_categories(products: &[Product], limit: usize) -> Vec<CategoryId> {
    let mut totals: HashMap<&CategoryId, (usize, u64)> = HashMap::new();
    for (position, product) in products.iter().enumerate() {
        let Some(category) = product.category_id.as_ref() else {
            continue;
        };
        let entry = totals.entry(category).or_insert((position, 0));
        entry.1 += u64::from(product.sold);
    }

    let mut ranked: Vec<_> = totals.into_iter().collect();
    ranked.sort_by(|(_, (pos_a, sold_a)), (_, (pos_b, sold_b))| {
        sold_b.cmp(sold_a).then(pos_a.cmp(pos_b))
    });
    ranked
        .into_iter()
        .take(limit)
        .map(|(id, _)| id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(id: &str, category: Option<&str>, sold: u32) -> Product {
        let mut p = Product::new(id, id, Money::new(100, Currency::VND)).with_stock(10, sold);
        p.category_id = category.map(CategoryId::new);
        p
    }

    #[test]
    fn test_category_builder() {
        let cat = Category::new("c1", "Giay").with_image("https://img/c1.png");
        assert_eq!(cat.id.as_str(), "c1");
        assert_eq!(cat.image_url.as_deref(), Some("https://img/c1.png"));
    }

    #[test]
    fn test_hot_categories_ranked_by_sales() {
        let products = vec![
            product("p1", Some("ao"), 5),
            product("p2", Some("quan"), 30),
            product("p3", Some("ao"), 10),
            product("p4", Some("giay"), 12),
            product("p5", None, 500),
        ];

        let hot = hot_categories(&products, 2);
        assert_eq!(hot, vec![CategoryId::new("quan"), CategoryId::new("ao")]);
    }

    #[test]
    fn test_hot_categories_tie_keeps_first_seen() {
        let products = vec![product("p1", Some("b"), 4), product("p2", Some("a"), 4)];
        assert_eq!(
            hot_categories(&products, 5),
            vec![CategoryId::new("b"), CategoryId::new("a")]
        );
    }
}
