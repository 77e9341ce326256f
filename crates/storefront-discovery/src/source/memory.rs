//! In-memory collaborator store.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures::channel::mpsc::{unbounded, UnboundedSender};

use crate::catalog::{Category, Product};
use crate::error::StoreError;
use crate::ids::ProductId;
use crate::reviews::RatingEvent;
use crate::source::snapshot::Collection;
use crate::source::{CatalogStore, ReviewChanges, ReviewStream, ReviewsChanged, VoucherStore};
use crate::voucher::Voucher;

#[derive(Default)]
struct State {
    products: Vec<Product>,
    categories: Vec<Category>,
    reviews: Vec<RatingEvent>,
    vouchers: Vec<Voucher>,
    failing: HashSet<Collection>,
}

struct Subscriber {
    product_id: Option<ProductId>,
    sender: UnboundedSender<ReviewsChanged>,
}

/// Implements every collaborator trait over plain vectors.
///
/// Any collection can be switched to fail, and published reviews notify
/// subscribers the way a realtime channel would.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.state().products = products;
        self
    }

    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        self.state().categories = categories;
        self
    }

    pub fn with_reviews(self, reviews: Vec<RatingEvent>) -> Self {
        self.state().reviews = reviews;
        self
    }

    pub fn with_vouchers(self, vouchers: Vec<Voucher>) -> Self {
        self.state().vouchers = vouchers;
        self
    }

    /// Replace the product collection.
    pub fn set_products(&self, products: Vec<Product>) {
        self.state().products = products;
    }

    /// Replace the voucher collection.
    pub fn set_vouchers(&self, vouchers: Vec<Voucher>) {
        self.state().vouchers = vouchers;
    }

    /// Make every fetch of `collection` fail until [`InMemoryStore::recover`].
    pub fn fail(&self, collection: Collection) {
        self.state().failing.insert(collection);
    }

    pub fn recover(&self, collection: Collection) {
        self.state().failing.remove(&collection);
    }

    /// Store a review and signal matching subscribers.
    ///
    /// The signal carries only the product id; subscribers re-read.
    pub fn publish_review(&self, event: RatingEvent) {
        let product_id = event.product_id.clone();
        self.state().reviews.push(event);

        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|sub| {
            if sub.product_id.as_ref().is_some_and(|id| id != &product_id) {
                return !sub.sender.is_closed();
            }
            sub.sender
                .unbounded_send(ReviewsChanged {
                    product_id: Some(product_id.clone()),
                })
                .is_ok()
        });
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read<T: Clone>(
        &self,
        collection: Collection,
        pick: impl FnOnce(&State) -> Vec<T>,
    ) -> Result<Vec<T>, StoreError> {
        let state = self.state();
        if state.failing.contains(&collection) {
            return Err(StoreError::fetch(collection.as_str(), "source unavailable"));
        }
        Ok(pick(&state))
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn products(&self) -> Result<Vec<Product>, StoreError> {
        self.read(Collection::Products, |s| s.products.clone())
    }

    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        self.read(Collection::Categories, |s| s.categories.clone())
    }
}

#[async_trait]
impl ReviewStream for InMemoryStore {
    async fn reviews(&self, product: Option<&ProductId>) -> Result<Vec<RatingEvent>, StoreError> {
        self.read(Collection::Reviews, |s| {
            s.reviews
                .iter()
                .filter(|e| product.map_or(true, |id| &e.product_id == id))
                .cloned()
                .collect()
        })
    }

    fn subscribe(&self, product: Option<&ProductId>) -> ReviewChanges {
        let (sender, receiver) = unbounded();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscriber {
                product_id: product.cloned(),
                sender,
            });
        receiver
    }
}

#[async_trait]
impl VoucherStore for InMemoryStore {
    async fn active_vouchers(&self) -> Result<Vec<Voucher>, StoreError> {
        self.read(Collection::Vouchers, |s| {
            s.vouchers.iter().filter(|v| v.is_active).cloned().collect()
        })
    }
}
