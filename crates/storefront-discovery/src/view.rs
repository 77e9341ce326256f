//! Derived views: everything the storefront renders, rebuilt from a snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{
    hot_categories, related_products, Category, FacetOptions, Product, ProductBadge,
};
use crate::config::DiscoveryConfig;
use crate::ids::{ProductId, UserId};
use crate::reviews::{aggregate_ratings, reviews_with_stars, RatingAggregate, RatingEvent, RatingSummary};
use crate::search::{
    filter_products, paginate, sort_products, suggestions, FacetPredicate, FacetSelection, Page,
};
use crate::source::{Notice, Snapshot};
use crate::voucher::{eligible_vouchers, Voucher};

/// The product listing view.
///
/// Holds owned copies, never references into the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedView {
    /// Current page of filtered, sorted products.
    pub page: Page<Product>,
    /// Number of products matching every facet.
    pub total_matches: usize,
    /// Autocomplete suggestions for the search text.
    pub suggestions: Vec<Product>,
    /// Vouchers the viewer can use right now.
    pub eligible_vouchers: Vec<Voucher>,
    /// Rating per reviewed product.
    pub ratings: RatingAggregate,
    /// Badges for products on the current page.
    pub badges: BTreeMap<ProductId, ProductBadge>,
    /// Selectable facet values.
    pub facet_options: FacetOptions,
    /// Best-selling categories.
    pub hot_categories: Vec<Category>,
    /// Collections that could not be loaded.
    pub notices: Vec<Notice>,
}

impl DerivedView {
    /// Whether the listing should show its empty state.
    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }
}

/// Recompute the listing view from scratch.
///
/// Pure: the same inputs always give the same view.
pub fn derive_view(
    snapshot: &Snapshot,
    selection: &FacetSelection,
    viewer: Option<&UserId>,
    now: DateTime<Utc>,
    config: &DiscoveryConfig,
) -> DerivedView {
    let ratings = aggregate_ratings(&snapshot.reviews);
    let predicate = FacetPredicate::new(selection, &ratings, config.unrated_policy);

    let filtered = filter_products(&snapshot.products, &predicate);
    let ordered = sort_products(&filtered, selection.sort);
    let page = paginate(&ordered, config.page_size, selection.page).map(Product::clone);

    let badges = page
        .items
        .iter()
        .filter_map(|p| p.badge(now, &config.badges).map(|b| (p.id.clone(), b)))
        .collect();

    let suggestions = suggestions(
        &snapshot.products,
        &selection.search_text,
        config.suggestion_limit,
    )
    .into_iter()
    .cloned()
    .collect();

    let eligible = eligible_vouchers(&snapshot.vouchers, viewer, now)
        .into_iter()
        .cloned()
        .collect();

    let hot = hot_categories(&snapshot.products, config.hot_category_limit)
        .into_iter()
        .filter_map(|id| snapshot.categories.iter().find(|c| c.id == id).cloned())
        .collect();

    debug!(
        matches = filtered.len(),
        page = page.pagination.page,
        total_pages = page.pagination.total_pages,
        rated = ratings.len(),
        "Derived view"
    );

    DerivedView {
        total_matches: filtered.len(),
        page,
        suggestions,
        eligible_vouchers: eligible,
        ratings,
        badges,
        facet_options: FacetOptions::from_products(&snapshot.products),
        hot_categories: hot,
        notices: snapshot.notices.clone(),
    }
}

/// Everything the product detail page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product: Product,
    pub category: Option<Category>,
    pub badge: Option<ProductBadge>,
    pub summary: RatingSummary,
    /// Reviews, newest first, filtered to one star value when asked.
    pub reviews: Vec<RatingEvent>,
    pub related: Vec<Product>,
}

/// Build the detail view for one product, or `None` if it is not in the snapshot.
pub fn product_detail(
    snapshot: &Snapshot,
    product_id: &ProductId,
    stars: Option<u8>,
    now: DateTime<Utc>,
    config: &DiscoveryConfig,
) -> Option<ProductDetail> {
    let product = snapshot.products.iter().find(|p| &p.id == product_id)?;
    let category = product
        .category_id
        .as_ref()
        .and_then(|id| snapshot.categories.iter().find(|c| &c.id == id))
        .cloned();

    Some(ProductDetail {
        product: product.clone(),
        category,
        badge: product.badge(now, &config.badges),
        summary: RatingSummary::from_events(product_id, &snapshot.reviews),
        reviews: reviews_with_stars(&snapshot.reviews, product_id, stars)
            .into_iter()
            .cloned()
            .collect(),
        related: related_products(product, &snapshot.products, config.related_limit)
            .into_iter()
            .cloned()
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PriceBounds;
    use crate::money::{Currency, Money};
    use crate::search::SortKey;
    use crate::voucher::VoucherDiscount;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn vnd(amount: i64) -> Money {
        Money::new(amount, Currency::VND)
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![
                Product::new("p1", "Ao thun", vnd(100))
                    .with_category("ao")
                    .with_stock(10, 50),
                Product::new("p2", "Ao so mi", vnd(300)).with_category("ao"),
                Product::new("p3", "Quan jean", vnd(200))
                    .with_category("quan")
                    .with_stock(2, 5),
            ],
            vec![Category::new("ao", "Ao"), Category::new("quan", "Quan")],
            vec![
                RatingEvent::new("p1", 5).unwrap(),
                RatingEvent::new("p3", 2).unwrap(),
            ],
            vec![
                Voucher::new("v1", "ALL", "All", VoucherDiscount::Percent(10.0), vnd(0)),
                Voucher::new("v2", "MINE", "Mine", VoucherDiscount::Percent(20.0), vnd(0))
                    .for_user("u1"),
            ],
        )
    }

    fn selection(snapshot: &Snapshot) -> FacetSelection {
        FacetSelection::new(PriceBounds::observe(&snapshot.products), Currency::VND)
    }

    #[test]
    fn test_default_view() {
        let snap = snapshot();
        let sel = selection(&snap);
        let view = derive_view(&snap, &sel, None, now(), &DiscoveryConfig::default());

        assert_eq!(view.total_matches, 3);
        let ids: Vec<&str> = view.page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p2", "p1"]);
        assert!(view.suggestions.is_empty());
        assert_eq!(view.eligible_vouchers.len(), 1);
        assert_eq!(view.hot_categories[0].id.as_str(), "ao");
        assert_eq!(view.badges.get(&ProductId::new("p1")), Some(&ProductBadge::BestSeller));
        assert_eq!(view.badges.get(&ProductId::new("p3")), Some(&ProductBadge::LowStock));
        assert_eq!(view.facet_options.price_bounds.map(|b| b.max), Some(vnd(300)));
    }

    #[test]
    fn test_view_with_filters_and_viewer() {
        let snap = snapshot();
        let mut sel = selection(&snap);
        sel.set_search("ao");
        sel.set_sort(SortKey::PriceDesc);
        let viewer = UserId::new("u1");
        let view = derive_view(&snap, &sel, Some(&viewer), now(), &DiscoveryConfig::default());

        let ids: Vec<&str> = view.page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
        assert_eq!(view.suggestions.len(), 2);
        assert_eq!(view.eligible_vouchers.len(), 2);
    }

    #[test]
    fn test_rating_filter_uses_aggregate() {
        let snap = snapshot();
        let mut sel = selection(&snap);
        sel.toggle_rating(2);
        let view = derive_view(&snap, &sel, None, now(), &DiscoveryConfig::default());
        assert_eq!(view.total_matches, 1);
        assert_eq!(view.page.items[0].id.as_str(), "p3");
    }

    #[test]
    fn test_empty_snapshot() {
        let snap = Snapshot::default();
        let sel = FacetSelection::new(None, Currency::VND);
        let view = derive_view(&snap, &sel, None, now(), &DiscoveryConfig::default());
        assert!(view.is_empty());
        assert_eq!(view.page.pagination.total_pages, 1);
        assert!(view.hot_categories.is_empty());
    }

    #[test]
    fn test_product_detail() {
        let snap = snapshot();
        let config = DiscoveryConfig::default();
        let detail = product_detail(&snap, &ProductId::new("p1"), None, now(), &config).unwrap();

        assert_eq!(detail.category.map(|c| c.name), Some("Ao".to_string()));
        assert_eq!(detail.summary.total_reviews, 1);
        assert_eq!(detail.reviews.len(), 1);
        let related: Vec<&str> = detail.related.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(related, vec!["p2"]);

        let fours = product_detail(&snap, &ProductId::new("p1"), Some(4), now(), &config).unwrap();
        assert!(fours.reviews.is_empty());
        assert!(product_detail(&snap, &ProductId::new("nope"), None, now(), &config).is_none());
    }
}
