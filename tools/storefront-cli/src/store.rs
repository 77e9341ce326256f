//! Collaborator stores backed by JSON snapshot files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::channel::mpsc::unbounded;
use storefront_discovery::catalog::{Category, Product};
use storefront_discovery::error::StoreError;
use storefront_discovery::ids::ProductId;
use storefront_discovery::money::Currency;
use storefront_discovery::reviews::RatingEvent;
use storefront_discovery::source::{
    decode_categories, decode_products, decode_reviews, decode_vouchers, CatalogStore,
    Collection, ReviewChanges, ReviewStream, VoucherStore,
};
use storefront_discovery::voucher::Voucher;
use tracing::debug;

/// Reads each collection from its own JSON file on every fetch.
pub struct FileStore {
    products: PathBuf,
    categories: PathBuf,
    reviews: PathBuf,
    vouchers: PathBuf,
    currency: Currency,
}

impl FileStore {
    pub fn new(
        products: PathBuf,
        categories: PathBuf,
        reviews: PathBuf,
        vouchers: PathBuf,
        currency: Currency,
    ) -> Self {
        Self {
            products,
            categories,
            reviews,
            vouchers,
            currency,
        }
    }

    async fn read(&self, collection: Collection, path: &Path) -> Result<String, StoreError> {
        debug!(source = %collection, path = %path.display(), "Reading snapshot file");
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::fetch(collection.as_str(), format!("{}: {}", path.display(), e)))
    }
}

#[async_trait]
impl CatalogStore for FileStore {
    async fn products(&self) -> Result<Vec<Product>, StoreError> {
        let json = self.read(Collection::Products, &self.products).await?;
        decode_products(&json, self.currency)
    }

    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let json = self.read(Collection::Categories, &self.categories).await?;
        decode_categories(&json)
    }
}

#[async_trait]
impl ReviewStream for FileStore {
    async fn reviews(&self, product: Option<&ProductId>) -> Result<Vec<RatingEvent>, StoreError> {
        let json = self.read(Collection::Reviews, &self.reviews).await?;
        let mut reviews = decode_reviews(&json)?;
        if let Some(id) = product {
            reviews.retain(|r| &r.product_id == id);
        }
        Ok(reviews)
    }

    /// Files are read once per command, so no change is ever signalled.
    fn subscribe(&self, _product: Option<&ProductId>) -> ReviewChanges {
        let (_sender, receiver) = unbounded();
        receiver
    }
}

#[async_trait]
impl VoucherStore for FileStore {
    async fn active_vouchers(&self) -> Result<Vec<Voucher>, StoreError> {
        let json = self.read(Collection::Vouchers, &self.vouchers).await?;
        let mut vouchers = decode_vouchers(&json, self.currency)?;
        vouchers.retain(|v| v.is_active);
        Ok(vouchers)
    }
}
