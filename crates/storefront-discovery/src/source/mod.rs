//! Collaborator stores the engine reads snapshots from.
//!
//! The engine never performs I/O itself. Catalog, review and voucher data
//! arrive through these traits as full snapshots; a review change signal only
//! says "re-read", it never carries the changed rows.

mod memory;
mod rows;
mod snapshot;

pub use memory::InMemoryStore;
pub use rows::{
    decode_categories, decode_products, decode_reviews, decode_vouchers, CategoryRow, ProductRow,
    ReviewRow, VoucherRow,
};
pub use snapshot::{Collection, Notice, Snapshot, SnapshotLoader};

use async_trait::async_trait;
use futures::channel::mpsc::UnboundedReceiver;
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Product};
use crate::error::StoreError;
use crate::ids::ProductId;
use crate::reviews::RatingEvent;
use crate::voucher::Voucher;

/// Signal that the review collection changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewsChanged {
    /// Product whose reviews changed, or None for "anything".
    pub product_id: Option<ProductId>,
}

/// Receiving end of a review subscription.
pub type ReviewChanges = UnboundedReceiver<ReviewsChanged>;

/// Source of products and categories.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch every product.
    async fn products(&self) -> Result<Vec<Product>, StoreError>;

    /// Fetch every category.
    async fn categories(&self) -> Result<Vec<Category>, StoreError>;
}

/// Source of review events, with optional change notifications.
#[async_trait]
pub trait ReviewStream: Send + Sync {
    /// Fetch reviews, for one product or all of them.
    async fn reviews(&self, product: Option<&ProductId>) -> Result<Vec<RatingEvent>, StoreError>;

    /// Subscribe to change signals, for one product or all of them.
    fn subscribe(&self, product: Option<&ProductId>) -> ReviewChanges;
}

/// Source of vouchers.
#[async_trait]
pub trait VoucherStore: Send + Sync {
    /// Fetch vouchers the upstream considers active.
    async fn active_vouchers(&self) -> Result<Vec<Voucher>, StoreError>;
}
