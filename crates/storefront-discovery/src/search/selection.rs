//! Facet selection state.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::catalog::PriceBounds;
use crate::error::DiscoveryError;
use crate::ids::CategoryId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Sort options for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Newest first (descending product id).
    #[default]
    Latest,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Latest,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::NameAsc,
        SortKey::NameDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Latest => "latest",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::NameAsc => "name_asc",
            SortKey::NameDesc => "name_desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Latest => "Newest",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::NameAsc => "Name: A-Z",
            SortKey::NameDesc => "Name: Z-A",
        }
    }
}

impl FromStr for SortKey {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| DiscoveryError::UnknownSortKey(s.to_string()))
    }
}

/// Inclusive price window. `min <= max` holds after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    min: Money,
    max: Money,
    /// Observed catalog bounds edits are clamped into.
    bounds: Option<PriceBounds>,
}

impl PriceRange {
    /// A window covering the whole observed catalog.
    ///
    /// With no bounds (empty catalog) the window is unbounded.
    pub fn full(bounds: Option<PriceBounds>, currency: Currency) -> Self {
        match bounds {
            Some(b) => Self {
                min: b.min,
                max: b.max,
                bounds,
            },
            None => Self {
                min: Money::zero(currency),
                max: Money::new(i64::MAX, currency),
                bounds: None,
            },
        }
    }

    pub fn min(&self) -> Money {
        self.min
    }

    pub fn max(&self) -> Money {
        self.max
    }

    pub fn bounds(&self) -> Option<PriceBounds> {
        self.bounds
    }

    /// Check if a price falls inside the window (inclusive).
    pub fn contains(&self, price: Money) -> bool {
        price.amount_minor >= self.min.amount_minor && price.amount_minor <= self.max.amount_minor
    }

    /// Whether the window still spans every observed price.
    pub fn is_full(&self) -> bool {
        match self.bounds {
            Some(b) => self.min == b.min && self.max == b.max,
            None => true,
        }
    }

    /// Move the lower bound. A value above `max` snaps to `max`.
    pub fn set_min(&mut self, value: Money) {
        let value = self.clamp_to_bounds(value);
        self.min = if value > self.max { self.max } else { value };
    }

    /// Move the upper bound. A value below `min` snaps to `min`.
    pub fn set_max(&mut self, value: Money) {
        let value = self.clamp_to_bounds(value);
        self.max = if value < self.min { self.min } else { value };
    }

    /// Apply user-entered text to the lower bound.
    ///
    /// Returns false and keeps the last valid value when the text is not a number.
    pub fn set_min_input(&mut self, input: &str) -> bool {
        match Money::parse_decimal(input, self.min.currency) {
            Some(value) => {
                self.set_min(value);
                true
            }
            None => false,
        }
    }

    /// Apply user-entered text to the upper bound. See [`PriceRange::set_min_input`].
    pub fn set_max_input(&mut self, input: &str) -> bool {
        match Money::parse_decimal(input, self.max.currency) {
            Some(value) => {
                self.set_max(value);
                true
            }
            None => false,
        }
    }

    fn clamp_to_bounds(&self, value: Money) -> Money {
        match self.bounds {
            Some(b) => b.clamp(value),
            None => value,
        }
    }
}

/// Everything the shopper has selected in the filter sidebar.
///
/// Mutators that change the result set reset `page` to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetSelection {
    pub category: Option<CategoryId>,
    pub price_range: PriceRange,
    /// Raw search box text. Matching trims it and ignores case.
    pub search_text: String,
    pub sizes: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    /// Selected star values.
    pub ratings: BTreeSet<u8>,
    pub only_discount: bool,
    pub sort: SortKey,
    /// Current page, 1-indexed.
    pub page: usize,
}

impl FacetSelection {
    /// A selection with no filters over the given price bounds.
    pub fn new(bounds: Option<PriceBounds>, currency: Currency) -> Self {
        Self {
            category: None,
            price_range: PriceRange::full(bounds, currency),
            search_text: String::new(),
            sizes: BTreeSet::new(),
            colors: BTreeSet::new(),
            ratings: BTreeSet::new(),
            only_discount: false,
            sort: SortKey::default(),
            page: 1,
        }
    }

    /// Trimmed, lowercased search text.
    pub fn normalized_search(&self) -> String {
        normalize_search(&self.search_text)
    }

    /// Check if any filter narrows the catalog.
    pub fn has_active_filters(&self) -> bool {
        self.category.is_some()
            || !self.price_range.is_full()
            || !self.normalized_search().is_empty()
            || !self.sizes.is_empty()
            || !self.colors.is_empty()
            || !self.ratings.is_empty()
            || self.only_discount
    }

    pub fn set_category(&mut self, category: Option<CategoryId>) {
        self.category = category;
        self.page = 1;
    }

    pub fn set_price_min(&mut self, value: Money) {
        self.price_range.set_min(value);
        self.page = 1;
    }

    pub fn set_price_max(&mut self, value: Money) {
        self.price_range.set_max(value);
        self.page = 1;
    }

    /// Returns false when the input was rejected and nothing changed.
    pub fn set_price_min_input(&mut self, input: &str) -> bool {
        let applied = self.price_range.set_min_input(input);
        if applied {
            self.page = 1;
        }
        applied
    }

    /// Returns false when the input was rejected and nothing changed.
    pub fn set_price_max_input(&mut self, input: &str) -> bool {
        let applied = self.price_range.set_max_input(input);
        if applied {
            self.page = 1;
        }
        applied
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    /// Add the size if absent, remove it if present.
    pub fn toggle_size(&mut self, size: impl Into<String>) {
        toggle(&mut self.sizes, size.into());
        self.page = 1;
    }

    /// Add the color if absent, remove it if present.
    pub fn toggle_color(&mut self, color: impl Into<String>) {
        toggle(&mut self.colors, color.into());
        self.page = 1;
    }

    /// Add the star value if absent, remove it if present.
    pub fn toggle_rating(&mut self, stars: u8) {
        toggle(&mut self.ratings, stars);
        self.page = 1;
    }

    pub fn set_only_discount(&mut self, only_discount: bool) {
        self.only_discount = only_discount;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    /// Jump to a page. Out-of-range values are clamped when the page is built.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Drop every filter but keep the sort order.
    pub fn clear_filters(&mut self) {
        let bounds = self.price_range.bounds();
        let currency = self.price_range.min().currency;
        let sort = self.sort;
        *self = Self::new(bounds, currency);
        self.sort = sort;
    }
}

pub(crate) fn normalize_search(text: &str) -> String {
    text.trim().to_lowercase()
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vnd(amount: i64) -> Money {
        Money::new(amount, Currency::VND)
    }

    fn bounds(min: i64, max: i64) -> Option<PriceBounds> {
        Some(PriceBounds {
            min: vnd(min),
            max: vnd(max),
        })
    }

    #[test]
    fn test_sort_key_round_trip_names() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("relevance".parse::<SortKey>().is_err());
        assert_eq!(" PRICE_ASC ".parse::<SortKey>().unwrap(), SortKey::PriceAsc);
    }

    #[test]
    fn test_price_range_starts_at_bounds() {
        let range = PriceRange::full(bounds(10, 200), Currency::VND);
        assert_eq!(range.min(), vnd(10));
        assert_eq!(range.max(), vnd(200));
        assert!(range.is_full());
        assert!(range.contains(vnd(10)));
        assert!(range.contains(vnd(200)));
        assert!(!range.contains(vnd(201)));
    }

    #[test]
    fn test_inverted_edit_snaps_to_other_bound() {
        let mut range = PriceRange::full(bounds(10, 200), Currency::VND);
        range.set_max(vnd(100));
        range.set_min(vnd(150));
        assert_eq!(range.min(), vnd(100));
        assert_eq!(range.max(), vnd(100));

        range.set_min(vnd(50));
        range.set_max(vnd(20));
        assert_eq!(range.min(), vnd(50));
        assert_eq!(range.max(), vnd(50));
    }

    #[test]
    fn test_edits_clamped_into_observed_bounds() {
        let mut range = PriceRange::full(bounds(10, 200), Currency::VND);
        range.set_min(vnd(0));
        range.set_max(vnd(10_000));
        assert_eq!(range.min(), vnd(10));
        assert_eq!(range.max(), vnd(200));
    }

    #[test]
    fn test_malformed_input_keeps_last_value() {
        let mut range = PriceRange::full(bounds(10, 200), Currency::VND);
        assert!(range.set_min_input("60"));
        assert_eq!(range.min(), vnd(60));

        assert!(!range.set_min_input("sixty"));
        assert!(!range.set_max_input(""));
        assert_eq!(range.min(), vnd(60));
        assert_eq!(range.max(), vnd(200));
    }

    #[test]
    fn test_empty_catalog_range_is_unbounded() {
        let range = PriceRange::full(None, Currency::VND);
        assert!(range.contains(vnd(0)));
        assert!(range.contains(vnd(i64::MAX)));
        assert!(range.is_full());
    }

    #[test]
    fn test_every_filter_change_resets_page() {
        let mut sel = FacetSelection::new(bounds(10, 200), Currency::VND);
        let mutations: Vec<Box<dyn Fn(&mut FacetSelection)>> = vec![
            Box::new(|s| s.set_category(Some(CategoryId::new("c1")))),
            Box::new(|s| s.set_price_min(vnd(50))),
            Box::new(|s| s.set_price_max(vnd(150))),
            Box::new(|s| s.set_search("ao")),
            Box::new(|s| s.toggle_size("M")),
            Box::new(|s| s.toggle_color("den")),
            Box::new(|s| s.toggle_rating(5)),
            Box::new(|s| s.set_only_discount(true)),
            Box::new(|s| s.set_sort(SortKey::PriceAsc)),
        ];

        for mutate in mutations {
            sel.set_page(3);
            mutate(&mut sel);
            assert_eq!(sel.page, 1);
        }
    }

    #[test]
    fn test_rejected_input_does_not_reset_page() {
        let mut sel = FacetSelection::new(bounds(10, 200), Currency::VND);
        sel.set_page(2);
        assert!(!sel.set_price_min_input("abc"));
        assert_eq!(sel.page, 2);
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut sel = FacetSelection::new(bounds(10, 200), Currency::VND);
        assert!(!sel.has_active_filters());

        sel.toggle_size("M");
        sel.toggle_size("L");
        sel.toggle_size("M");
        assert_eq!(sel.sizes.iter().collect::<Vec<_>>(), vec!["L"]);

        sel.set_search("   ");
        assert!(sel.has_active_filters());

        sel.set_sort(SortKey::NameDesc);
        sel.clear_filters();
        assert!(!sel.has_active_filters());
        assert_eq!(sel.sort, SortKey::NameDesc);
    }
}
