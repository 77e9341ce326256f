//! The product predicate built from a facet selection.
//!
//! Facets combine with AND; values inside one facet combine with OR. Each
//! facet check is also exposed on its own so callers can explain why a
//! product was left out.

use std::collections::BTreeSet;

use crate::catalog::Product;
use crate::ids::CategoryId;
use crate::reviews::RatingAggregate;
use crate::search::selection::{normalize_search, FacetSelection, PriceRange};
use serde::{Deserialize, Serialize};

/// How products without any reviews behave under a star filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnratedPolicy {
    /// Unrated products never match a star filter.
    #[default]
    Exclude,
    /// Unrated products count as 0 stars and match only when 0 is selected.
    TreatAsZero,
}

/// A facet a product can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    Category,
    Price,
    Text,
    Size,
    Color,
    Rating,
    Discount,
}

/// A pure predicate over products.
///
/// Borrows the selection and the rating aggregate it was built from; build a
/// new one after either changes.
#[derive(Debug, Clone)]
pub struct FacetPredicate<'a> {
    category: Option<&'a CategoryId>,
    price: Option<PriceRange>,
    needle: String,
    sizes: Option<&'a BTreeSet<String>>,
    colors: Option<&'a BTreeSet<String>>,
    ratings: Option<(&'a BTreeSet<u8>, &'a RatingAggregate)>,
    only_discount: bool,
    unrated: UnratedPolicy,
}

impl<'a> FacetPredicate<'a> {
    /// Build the predicate for every facet in `selection`.
    pub fn new(
        selection: &'a FacetSelection,
        ratings: &'a RatingAggregate,
        unrated: UnratedPolicy,
    ) -> Self {
        Self {
            category: selection.category.as_ref(),
            price: Some(selection.price_range),
            needle: selection.normalized_search(),
            sizes: non_empty(&selection.sizes),
            colors: non_empty(&selection.colors),
            ratings: non_empty(&selection.ratings).map(|stars| (stars, ratings)),
            only_discount: selection.only_discount,
            unrated,
        }
    }

    /// Only the text-search facet, as used for autocomplete suggestions.
    pub fn text_only(search_text: &str) -> Self {
        Self {
            category: None,
            price: None,
            needle: normalize_search(search_text),
            sizes: None,
            colors: None,
            ratings: None,
            only_discount: false,
            unrated: UnratedPolicy::default(),
        }
    }

    /// Whether the trimmed search text is empty.
    pub fn has_empty_search(&self) -> bool {
        self.needle.is_empty()
    }

    /// Check whether a product passes every facet.
    pub fn matches(&self, product: &Product) -> bool {
        self.first_failure(product).is_none()
    }

    /// The first facet `product` fails, in sidebar order.
    pub fn first_failure(&self, product: &Product) -> Option<FacetKind> {
        if !matches_category(product, self.category) {
            return Some(FacetKind::Category);
        }
        if let Some(range) = &self.price {
            if !range.contains(product.price) {
                return Some(FacetKind::Price);
            }
        }
        if !matches_text(product, &self.needle) {
            return Some(FacetKind::Text);
        }
        if let Some(sizes) = self.sizes {
            if !intersects(&product.sizes, sizes) {
                return Some(FacetKind::Size);
            }
        }
        if let Some(colors) = self.colors {
            if !intersects(&product.colors, colors) {
                return Some(FacetKind::Color);
            }
        }
        if let Some((stars, aggregate)) = self.ratings {
            if !matches_rating(product, stars, aggregate, self.unrated) {
                return Some(FacetKind::Rating);
            }
        }
        if self.only_discount && !product.is_discounted() {
            return Some(FacetKind::Discount);
        }
        None
    }
}

/// Category facet: no selection, or the product's category equals it.
pub fn matches_category(product: &Product, selected: Option<&CategoryId>) -> bool {
    match selected {
        None => true,
        Some(category) => product.category_id.as_ref() == Some(category),
    }
}

/// Text facet: `needle` must already be trimmed and lowercased.
pub fn matches_text(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

/// Rating facet: the rounded average must be one of the selected star values.
pub fn matches_rating(
    product: &Product,
    selected: &BTreeSet<u8>,
    aggregate: &RatingAggregate,
    unrated: UnratedPolicy,
) -> bool {
    if selected.is_empty() {
        return true;
    }
    match (aggregate.get(&product.id), unrated) {
        (Some(rating), _) => selected.contains(&rating.rounded_stars()),
        (None, UnratedPolicy::Exclude) => false,
        (None, UnratedPolicy::TreatAsZero) => selected.contains(&0),
    }
}

fn intersects(labels: &[String], selected: &BTreeSet<String>) -> bool {
    labels.iter().any(|label| selected.contains(label))
}

fn non_empty<T>(set: &BTreeSet<T>) -> Option<&BTreeSet<T>> {
    (!set.is_empty()).then_some(set)
}
