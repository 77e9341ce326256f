//! Stateful wrapper around [`derive_view`].
//!
//! Owns the latest snapshot, the facet selection, the viewer and the
//! configuration. Every mutation is followed by a full recompute in
//! [`DiscoveryEngine::view`]; nothing is updated incrementally.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::catalog::PriceBounds;
use crate::config::DiscoveryConfig;
use crate::ids::{CategoryId, ProductId, UserId};
use crate::money::Money;
use crate::search::{FacetSelection, PriceRange, SortKey};
use crate::source::{CatalogStore, ReviewStream, Snapshot, SnapshotLoader, VoucherStore};
use crate::view::{derive_view, product_detail, DerivedView, ProductDetail};

/// The product discovery engine.
#[derive(Debug, Clone)]
pub struct DiscoveryEngine {
    snapshot: Snapshot,
    selection: FacetSelection,
    viewer: Option<UserId>,
    config: DiscoveryConfig,
}

impl DiscoveryEngine {
    /// An engine over an empty snapshot.
    pub fn new(config: DiscoveryConfig) -> Self {
        Self::with_snapshot(Snapshot::default(), config)
    }

    /// An engine over an already-materialized snapshot.
    pub fn with_snapshot(snapshot: Snapshot, config: DiscoveryConfig) -> Self {
        let selection =
            FacetSelection::new(PriceBounds::observe(&snapshot.products), config.currency);
        Self {
            snapshot,
            selection,
            viewer: None,
            config,
        }
    }

    /// Load a snapshot from the stores and build an engine over it.
    pub async fn load(
        catalog: &dyn CatalogStore,
        reviews: &dyn ReviewStream,
        vouchers: &dyn VoucherStore,
        config: DiscoveryConfig,
    ) -> Self {
        let snapshot = SnapshotLoader::load(catalog, reviews, vouchers).await;
        Self::with_snapshot(snapshot, config)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn selection(&self) -> &FacetSelection {
        &self.selection
    }

    pub fn viewer(&self) -> Option<&UserId> {
        self.viewer.as_ref()
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Swap in a new snapshot.
    ///
    /// The price window is reset to the new observed bounds and the page to 1.
    /// Other facets are kept.
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        let bounds = PriceBounds::observe(&snapshot.products);
        self.selection.price_range = PriceRange::full(bounds, self.config.currency);
        self.selection.page = 1;
        self.snapshot = snapshot;
        info!(
            products = self.snapshot.products.len(),
            "Replaced snapshot"
        );
    }

    /// Re-read every review after a change signal.
    pub async fn on_reviews_changed(&mut self, reviews: &dyn ReviewStream) {
        SnapshotLoader::refresh_reviews(reviews, &mut self.snapshot).await;
    }

    pub fn set_viewer(&mut self, viewer: Option<UserId>) {
        self.viewer = viewer;
    }

    pub fn set_category(&mut self, category: Option<CategoryId>) {
        self.selection.set_category(category);
    }

    pub fn set_price_min(&mut self, value: Money) {
        self.selection.set_price_min(value);
    }

    pub fn set_price_max(&mut self, value: Money) {
        self.selection.set_price_max(value);
    }

    /// Apply typed text to the lower price bound. Returns false if it was ignored.
    pub fn set_price_min_input(&mut self, input: &str) -> bool {
        let applied = self.selection.set_price_min_input(input);
        if !applied {
            debug!(input, "Ignoring malformed minimum price");
        }
        applied
    }

    /// Apply typed text to the upper price bound. Returns false if it was ignored.
    pub fn set_price_max_input(&mut self, input: &str) -> bool {
        let applied = self.selection.set_price_max_input(input);
        if !applied {
            debug!(input, "Ignoring malformed maximum price");
        }
        applied
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.selection.set_search(text);
    }

    pub fn toggle_size(&mut self, size: impl Into<String>) {
        self.selection.toggle_size(size);
    }

    pub fn toggle_color(&mut self, color: impl Into<String>) {
        self.selection.toggle_color(color);
    }

    pub fn toggle_rating(&mut self, stars: u8) {
        self.selection.toggle_rating(stars);
    }

    pub fn set_only_discount(&mut self, only_discount: bool) {
        self.selection.set_only_discount(only_discount);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.selection.set_sort(sort);
    }

    pub fn set_page(&mut self, page: usize) {
        self.selection.set_page(page);
    }

    pub fn clear_filters(&mut self) {
        self.selection.clear_filters();
    }

    /// Recompute the listing view.
    pub fn view(&self, now: DateTime<Utc>) -> DerivedView {
        derive_view(
            &self.snapshot,
            &self.selection,
            self.viewer.as_ref(),
            now,
            &self.config,
        )
    }

    /// Detail view for one product.
    pub fn product(
        &self,
        product_id: &ProductId,
        stars: Option<u8>,
        now: DateTime<Utc>,
    ) -> Option<ProductDetail> {
        product_detail(&self.snapshot, product_id, stars, now, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::Currency;
    use crate::reviews::RatingEvent;
    use crate::source::{Collection, InMemoryStore};
    use chrono::TimeZone;
    use futures::executor::block_on;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn vnd(amount: i64) -> Money {
        Money::new(amount, Currency::VND)
    }

    fn products(prices: &[i64]) -> Vec<Product> {
        prices
            .iter()
            .enumerate()
            .map(|(i, price)| Product::new(format!("p{i}"), format!("Item {i}"), vnd(*price)))
            .collect()
    }

    #[test]
    fn test_price_range_starts_at_observed_bounds() {
        let engine = DiscoveryEngine::with_snapshot(
            Snapshot::new(products(&[30, 10, 90]), vec![], vec![], vec![]),
            DiscoveryConfig::default(),
        );
        let range = engine.selection().price_range;
        assert_eq!(range.min(), vnd(10));
        assert_eq!(range.max(), vnd(90));
    }

    #[test]
    fn test_replace_snapshot_resets_price_and_page() {
        let mut engine = DiscoveryEngine::with_snapshot(
            Snapshot::new(products(&[10, 20]), vec![], vec![], vec![]),
            DiscoveryConfig::default(),
        );
        engine.set_search("item");
        engine.set_price_max(vnd(15));
        engine.set_page(4);

        engine.replace_snapshot(Snapshot::new(products(&[5, 500]), vec![], vec![], vec![]));
        let sel = engine.selection();
        assert_eq!(sel.price_range.min(), vnd(5));
        assert_eq!(sel.price_range.max(), vnd(500));
        assert_eq!(sel.page, 1);
        assert_eq!(sel.search_text, "item");
    }

    #[test]
    fn test_malformed_price_input_ignored() {
        let mut engine = DiscoveryEngine::with_snapshot(
            Snapshot::new(products(&[10, 20]), vec![], vec![], vec![]),
            DiscoveryConfig::default(),
        );
        assert!(!engine.set_price_min_input("ten"));
        assert_eq!(engine.selection().price_range.min(), vnd(10));
        assert!(engine.set_price_min_input("15"));
        assert_eq!(engine.view(now()).total_matches, 1);
    }

    #[test]
    fn test_view_survives_unvalidated_badge_window() {
        let mut config = DiscoveryConfig::default();
        config.badges.new_arrival_days = i64::MAX / 1000;
        let fresh: Vec<Product> = products(&[10, 20])
            .into_iter()
            .map(|p| p.with_stock(10, 0).created_at(now()))
            .collect();
        let engine =
            DiscoveryEngine::with_snapshot(Snapshot::new(fresh, vec![], vec![], vec![]), config);

        let view = engine.view(now());
        assert_eq!(view.total_matches, 2);
        assert!(view.badges.is_empty());
    }

    #[test]
    fn test_stale_page_clamped_in_view() {
        let config = DiscoveryConfig {
            page_size: 2,
            ..Default::default()
        };
        let mut engine = DiscoveryEngine::with_snapshot(
            Snapshot::new(products(&[1, 2, 3, 4, 5]), vec![], vec![], vec![]),
            config,
        );
        engine.set_page(10);
        let view = engine.view(now());
        assert_eq!(view.page.pagination.page, 3);
        assert_eq!(view.page.items.len(), 1);
    }

    #[test]
    fn test_review_signal_triggers_full_reread() {
        let store = InMemoryStore::new()
            .with_products(products(&[10]))
            .with_reviews(vec![RatingEvent::new("p0", 1).unwrap()]);
        let mut engine = block_on(DiscoveryEngine::load(
            &store,
            &store,
            &store,
            DiscoveryConfig::default(),
        ));
        let mut changes = store.subscribe(None);

        store.publish_review(RatingEvent::new("p0", 5).unwrap());
        assert!(block_on(futures::StreamExt::next(&mut changes)).is_some());
        block_on(engine.on_reviews_changed(&store));

        let view = engine.view(now());
        assert_eq!(view.ratings.average(&ProductId::new("p0")), Some(3.0));
    }

    #[test]
    fn test_load_with_failed_store_degrades() {
        let store = InMemoryStore::new().with_products(products(&[10]));
        store.fail(Collection::Vouchers);
        let engine = block_on(DiscoveryEngine::load(
            &store,
            &store,
            &store,
            DiscoveryConfig::default(),
        ));
        let view = engine.view(now());
        assert_eq!(view.total_matches, 1);
        assert!(view.eligible_vouchers.is_empty());
        assert_eq!(view.notices.len(), 1);
    }
}
