//! Ordering of filtered results.

use std::cmp::{Ordering, Reverse};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::catalog::Product;
use crate::search::selection::SortKey;

/// Order products by `key` without touching the input.
///
/// Every order is stable: products that compare equal keep their relative
/// input order. Price orders use the list price. Name orders compare
/// case-folded names with diacritics stripped first, so "Áo" sorts with "ao"
/// rather than after "z"; the full lowercased name breaks ties between
/// accented variants.
pub fn sort_products<'a>(items: &[&'a Product], key: SortKey) -> Vec<&'a Product> {
    let mut ordered = items.to_vec();
    match key {
        SortKey::Latest => ordered.sort_by(|a, b| b.id.cmp(&a.id)),
        SortKey::PriceAsc => ordered.sort_by(|a, b| compare_price(a, b)),
        SortKey::PriceDesc => ordered.sort_by(|a, b| compare_price(b, a)),
        SortKey::NameAsc => ordered.sort_by_cached_key(|p| collation_key(&p.name)),
        SortKey::NameDesc => ordered.sort_by_cached_key(|p| Reverse(collation_key(&p.name))),
    }
    ordered
}

fn collation_key(name: &str) -> (String, String) {
    let lower = name.to_lowercase();
    let folded = lower
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == 'đ' { 'd' } else { c })
        .collect();
    (folded, lower)
}

fn compare_price(a: &Product, b: &Product) -> Ordering {
    a.price.amount_minor.cmp(&b.price.amount_minor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(id: &str, name: &str, price: i64) -> Product {
        Product::new(id, name, Money::new(price, Currency::VND))
    }

    fn ids(items: &[&Product]) -> Vec<String> {
        items.iter().map(|p| p.id.to_string()).collect()
    }

    fn sample() -> Vec<Product> {
        vec![
            product("p2", "banana", 300),
            product("p4", "Apple", 100),
            product("p1", "cherry", 300),
            product("p3", "apple", 200),
        ]
    }

    #[test]
    fn test_latest_descending_id() {
        let products = sample();
        let refs: Vec<&Product> = products.iter().collect();
        assert_eq!(ids(&sort_products(&refs, SortKey::Latest)), ["p4", "p3", "p2", "p1"]);
    }

    #[test]
    fn test_price_sort_is_stable() {
        let products = sample();
        let refs: Vec<&Product> = products.iter().collect();

        let asc = sort_products(&refs, SortKey::PriceAsc);
        assert_eq!(ids(&asc), ["p4", "p3", "p2", "p1"]);

        let desc = sort_products(&refs, SortKey::PriceDesc);
        assert_eq!(ids(&desc), ["p2", "p1", "p3", "p4"]);
    }

    #[test]
    fn test_name_sort_ignores_case_and_keeps_ties() {
        let products = sample();
        let refs: Vec<&Product> = products.iter().collect();

        let asc = sort_products(&refs, SortKey::NameAsc);
        assert_eq!(ids(&asc), ["p4", "p3", "p2", "p1"]);

        let desc = sort_products(&refs, SortKey::NameDesc);
        assert_eq!(ids(&desc), ["p1", "p2", "p4", "p3"]);
    }

    #[test]
    fn test_name_sort_folds_vietnamese_diacritics() {
        let products = vec![
            product("p1", "Áo thun", 100),
            product("p2", "Quần jean", 100),
            product("p3", "Bàn", 100),
            product("p4", "Đầm", 100),
        ];
        let refs: Vec<&Product> = products.iter().collect();

        let asc = sort_products(&refs, SortKey::NameAsc);
        let names: Vec<&str> = asc.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Áo thun", "Bàn", "Đầm", "Quần jean"]);

        let desc = sort_products(&refs, SortKey::NameDesc);
        assert_eq!(ids(&desc), ["p2", "p4", "p3", "p1"]);
    }

    #[test]
    fn test_input_untouched() {
        let products = sample();
        let refs: Vec<&Product> = products.iter().collect();
        let _ = sort_products(&refs, SortKey::PriceAsc);
        assert_eq!(ids(&refs), ["p2", "p4", "p1", "p3"]);
    }

    #[test]
    fn test_sorted_list_is_fixed_point() {
        let products = sample();
        let refs: Vec<&Product> = products.iter().collect();
        for key in SortKey::ALL {
            let once = sort_products(&refs, key);
            let twice = sort_products(&once, key);
            assert_eq!(ids(&once), ids(&twice), "{key:?}");
        }
    }
}
