//! Pulling full snapshots out of the collaborator stores.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{Category, Product};
use crate::error::StoreError;
use crate::reviews::RatingEvent;
use crate::source::{CatalogStore, ReviewStream, VoucherStore};
use crate::voucher::Voucher;

/// One of the collections a snapshot is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Products,
    Categories,
    Reviews,
    Vouchers,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Categories => "categories",
            Collection::Reviews => "reviews",
            Collection::Vouchers => "vouchers",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal problem the shopper should be told about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Collection that could not be loaded.
    pub source: Collection,
    /// Human-readable reason.
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not load {}: {}", self.source, self.message)
    }
}

/// Every raw collection the engine derives its view from.
///
/// Owned outright; nothing outside the snapshot can change it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub reviews: Vec<RatingEvent>,
    pub vouchers: Vec<Voucher>,
    /// Collections that were substituted with an empty one.
    #[serde(default)]
    pub notices: Vec<Notice>,
}

impl Snapshot {
    /// Build a snapshot from already-materialized collections.
    pub fn new(
        products: Vec<Product>,
        categories: Vec<Category>,
        reviews: Vec<RatingEvent>,
        vouchers: Vec<Voucher>,
    ) -> Self {
        Self {
            products,
            categories,
            reviews,
            vouchers,
            notices: Vec::new(),
        }
    }

    /// Whether any collection failed to load.
    pub fn is_degraded(&self) -> bool {
        !self.notices.is_empty()
    }
}

/// Loads snapshots from the collaborator stores. Never fails.
pub struct SnapshotLoader;

impl SnapshotLoader {
    /// Fetch every collection.
    ///
    /// A failed fetch becomes an empty collection plus a [`Notice`].
    pub async fn load(
        catalog: &dyn CatalogStore,
        reviews: &dyn ReviewStream,
        vouchers: &dyn VoucherStore,
    ) -> Snapshot {
        let (products, categories, events, codes) = futures::join!(
            catalog.products(),
            catalog.categories(),
            reviews.reviews(None),
            vouchers.active_vouchers()
        );

        let mut notices = Vec::new();
        let snapshot = Snapshot {
            products: settle(Collection::Products, products, &mut notices),
            categories: settle(Collection::Categories, categories, &mut notices),
            reviews: settle(Collection::Reviews, events, &mut notices),
            vouchers: settle(Collection::Vouchers, codes, &mut notices),
            notices,
        };

        debug!(
            products = snapshot.products.len(),
            categories = snapshot.categories.len(),
            reviews = snapshot.reviews.len(),
            vouchers = snapshot.vouchers.len(),
            notices = snapshot.notices.len(),
            "Loaded snapshot"
        );
        snapshot
    }

    /// Replace the review collection with a fresh full read.
    pub async fn refresh_reviews(reviews: &dyn ReviewStream, snapshot: &mut Snapshot) {
        snapshot
            .notices
            .retain(|notice| notice.source != Collection::Reviews);
        let fetched = reviews.reviews(None).await;
        snapshot.reviews = settle(Collection::Reviews, fetched, &mut snapshot.notices);
        debug!(reviews = snapshot.reviews.len(), "Refreshed reviews");
    }
}

fn settle<T>(
    collection: Collection,
    fetched: Result<Vec<T>, StoreError>,
    notices: &mut Vec<Notice>,
) -> Vec<T> {
    match fetched {
        Ok(items) => items,
        Err(err) => {
            warn!(source = %collection, error = %err, "Using empty collection");
            notices.push(Notice {
                source: collection,
                message: err.to_string(),
            });
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};
    use crate::source::InMemoryStore;
    use futures::executor::block_on;

    fn store() -> InMemoryStore {
        InMemoryStore::new()
            .with_products(vec![Product::new("p1", "Ao", Money::new(10, Currency::VND))])
            .with_reviews(vec![RatingEvent::new("p1", 4).unwrap()])
    }

    #[test]
    fn test_load_all_collections() {
        let store = store();
        let snapshot = block_on(SnapshotLoader::load(&store, &store, &store));
        assert_eq!(snapshot.products.len(), 1);
        assert_eq!(snapshot.reviews.len(), 1);
        assert!(!snapshot.is_degraded());
    }

    #[test]
    fn test_failed_source_becomes_empty_with_notice() {
        let store = store();
        store.fail(Collection::Products);

        let snapshot = block_on(SnapshotLoader::load(&store, &store, &store));
        assert!(snapshot.products.is_empty());
        assert_eq!(snapshot.reviews.len(), 1);
        assert_eq!(snapshot.notices.len(), 1);
        assert_eq!(snapshot.notices[0].source, Collection::Products);
    }

    #[test]
    fn test_refresh_reviews_replaces_collection() {
        let store = store();
        let mut snapshot = block_on(SnapshotLoader::load(&store, &store, &store));

        store.publish_review(RatingEvent::new("p1", 2).unwrap());
        block_on(SnapshotLoader::refresh_reviews(&store, &mut snapshot));
        assert_eq!(snapshot.reviews.len(), 2);

        store.fail(Collection::Reviews);
        block_on(SnapshotLoader::refresh_reviews(&store, &mut snapshot));
        assert!(snapshot.reviews.is_empty());
        assert_eq!(snapshot.notices.len(), 1);

        store.recover(Collection::Reviews);
        block_on(SnapshotLoader::refresh_reviews(&store, &mut snapshot));
        assert_eq!(snapshot.reviews.len(), 2);
        assert!(!snapshot.is_degraded());
    }
}
