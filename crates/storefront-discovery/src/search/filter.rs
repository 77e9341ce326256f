//! Applying a facet predicate to a product snapshot.

use crate::catalog::Product;
use crate::search::predicate::FacetPredicate;

/// Default cap for autocomplete suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 6;

/// Keep the products `predicate` accepts, in input order.
pub fn filter_products<'a>(products: &'a [Product], predicate: &FacetPredicate<'_>) -> Vec<&'a Product> {
    products.iter().filter(|p| predicate.matches(p)).collect()
}

/// Autocomplete suggestions for the search box.
///
/// Only the text facet applies, and at most `limit` products come back in
/// catalog order. Empty or whitespace-only text yields nothing.
pub fn suggestions<'a>(products: &'a [Product], search_text: &str, limit: usize) -> Vec<&'a Product> {
    let predicate = FacetPredicate::text_only(search_text);
    if predicate.has_empty_search() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|p| predicate.matches(p))
        .take(limit)
        .collect()
}
