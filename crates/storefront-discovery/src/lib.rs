//! Product discovery for the storefront.
//!
//! Turns a product snapshot plus the shopper's facet selection into a
//! filtered, sorted, paginated listing, with live search suggestions,
//! per-product rating aggregates and the vouchers the shopper can use.
//!
//! - **Catalog**: products, categories, facet options, badges
//! - **Reviews**: rating events, aggregates, per-product summaries
//! - **Search**: facet selection, predicate, filter, sort, pagination
//! - **Vouchers**: eligibility and display helpers
//! - **Source**: collaborator store traits and snapshot loading
//!
//! The engine performs no I/O. Snapshots come in through the [`source`]
//! traits and every view is recomputed from scratch.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use storefront_discovery::prelude::*;
//!
//! let snapshot = Snapshot::new(
//!     vec![
//!         Product::new("p1", "Ao thun", Money::new(150_000, Currency::VND)),
//!         Product::new("p2", "Quan jean", Money::new(320_000, Currency::VND)),
//!     ],
//!     vec![],
//!     vec![RatingEvent::new("p1", 5).unwrap()],
//!     vec![],
//! );
//!
//! let mut engine = DiscoveryEngine::with_snapshot(snapshot, DiscoveryConfig::default());
//! engine.set_sort(SortKey::PriceAsc);
//! engine.set_search("ao");
//!
//! let view = engine.view(Utc::now());
//! assert_eq!(view.total_matches, 1);
//! assert_eq!(view.page.items[0].name, "Ao thun");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod config;
pub mod engine;
pub mod reviews;
pub mod search;
pub mod source;
pub mod view;
pub mod voucher;

pub use error::{DiscoveryError, StoreError};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{DiscoveryError, StoreError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        hot_categories, related_products, BadgeThresholds, Category, FacetOptions, PriceBounds,
        Product, ProductBadge,
    };

    // Reviews
    pub use crate::reviews::{
        aggregate_ratings, reviews_with_stars, ProductRating, RatingAggregate, RatingEvent,
        RatingSummary,
    };

    // Search
    pub use crate::search::{
        filter_products, paginate, sort_products, suggestions, FacetPredicate, FacetSelection,
        Page, Pagination, PriceRange, SortKey, UnratedPolicy,
    };

    // Vouchers
    pub use crate::voucher::{eligible_vouchers, Voucher, VoucherDiscount};

    // Sources
    pub use crate::source::{
        CatalogStore, Collection, InMemoryStore, Notice, ReviewChanges, ReviewStream,
        ReviewsChanged, Snapshot, SnapshotLoader, VoucherStore,
    };

    // Engine
    pub use crate::config::DiscoveryConfig;
    pub use crate::engine::DiscoveryEngine;
    pub use crate::view::{derive_view, product_detail, DerivedView, ProductDetail};
}
