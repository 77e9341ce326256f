//! Search module.
//!
//! The filter, sort and paginate pipeline over a product snapshot, plus the
//! facet selection that drives it.

mod filter;
mod pagination;
mod predicate;
mod selection;
mod sort;

pub use filter::{filter_products, suggestions, DEFAULT_SUGGESTION_LIMIT};
pub use pagination::{paginate, Page, Pagination, DEFAULT_PAGE_SIZE};
pub use predicate::{
    matches_category, matches_rating, matches_text, FacetKind, FacetPredicate, UnratedPolicy,
};
pub use selection::{FacetSelection, PriceRange, SortKey};
pub use sort::sort_products;
