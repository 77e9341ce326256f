//! Raw storefront table rows and their conversion into domain types.
//!
//! Rows are snake_case JSON records with decimal amounts. A row that fails to
//! decode or convert is skipped with a warning; the rest of the batch loads.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{Category, Product};
use crate::error::StoreError;
use crate::ids::{CategoryId, ProductId, ReviewId, UserId, VoucherId};
use crate::money::{Currency, Money};
use crate::reviews::RatingEvent;
use crate::voucher::{Voucher, VoucherDiscount};

/// A `products` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub sizes: Option<Vec<String>>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub sold: i64,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProductRow {
    /// Convert into a product priced in `currency`.
    pub fn into_product(self, currency: Currency) -> Result<Product, String> {
        let price = amount(self.price, currency)
            .ok_or_else(|| format!("product {} has invalid price {}", self.id, self.price))?;
        // Invalid sale prices are dropped; the product still loads.
        let discount_price = self.discount_price.and_then(|dp| amount(dp, currency));
        let stock = u32::try_from(self.stock)
            .map_err(|_| format!("product {} has invalid stock {}", self.id, self.stock))?;
        let sold = u32::try_from(self.sold)
            .map_err(|_| format!("product {} has invalid sold count {}", self.id, self.sold))?;

        let mut image_urls = self.image_urls.unwrap_or_default();
        if let Some(cover) = self.image_url.filter(|url| !url.is_empty()) {
            if !image_urls.contains(&cover) {
                image_urls.insert(0, cover);
            }
        }

        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            description: self.description.unwrap_or_default(),
            price,
            discount_price,
            category_id: self.category_id.filter(|c| !c.is_empty()).map(CategoryId::new),
            sizes: self.sizes.unwrap_or_default(),
            colors: self.colors.unwrap_or_default(),
            stock,
            sold,
            is_featured: self.is_featured,
            image_urls,
            created_at: self.created_at,
        })
    }
}

/// A `categories` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: CategoryId::new(row.id),
            name: row.name,
            image_url: row.image_url,
        }
    }
}

/// A `reviews` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRow {
    #[serde(default)]
    pub id: Option<String>,
    pub product_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<ReviewRow> for RatingEvent {
    type Error = String;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let mut event = RatingEvent::new(row.product_id, row.rating).map_err(|e| e.to_string())?;
        event.id = row.id.map(ReviewId::new);
        event.user_id = row.user_id.map(UserId::new);
        event.comment = row.comment;
        event.created_at = row.created_at;
        Ok(event)
    }
}

/// A `vouchers` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherRow {
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub discount_type: String,
    pub discount_value: f64,
    #[serde(default)]
    pub min_order_value: f64,
    #[serde(default)]
    pub max_discount: Option<f64>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub valid_to: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub used: i64,
}

fn default_true() -> bool {
    true
}

impl VoucherRow {
    /// Convert into a voucher with amounts in `currency`.
    pub fn into_voucher(self, currency: Currency) -> Result<Voucher, String> {
        let discount = match self.discount_type.as_str() {
            "percent" if (0.0..=100.0).contains(&self.discount_value) => {
                VoucherDiscount::Percent(self.discount_value)
            }
            "fixed" => VoucherDiscount::Fixed(amount(self.discount_value, currency).ok_or_else(
                || format!("voucher {} has invalid value {}", self.code, self.discount_value),
            )?),
            other => {
                return Err(format!(
                    "voucher {} has unsupported discount {} {}",
                    self.code, other, self.discount_value
                ))
            }
        };
        let min_order_value = amount(self.min_order_value, currency).ok_or_else(|| {
            format!(
                "voucher {} has invalid minimum {}",
                self.code, self.min_order_value
            )
        })?;

        Ok(Voucher {
            id: VoucherId::new(self.id),
            title: self.title.unwrap_or_else(|| self.code.clone()),
            code: self.code,
            description: self.description,
            discount,
            min_order_value,
            max_discount: self.max_discount.and_then(|m| amount(m, currency)),
            user_id: self.user_id.filter(|u| !u.is_empty()).map(UserId::new),
            valid_to: self.valid_to,
            is_active: self.is_active,
            quantity: u32::try_from(self.quantity).unwrap_or(0),
            used: u32::try_from(self.used).unwrap_or(0),
        })
    }
}

/// Decode a JSON array of product rows.
pub fn decode_products(json: &str, currency: Currency) -> Result<Vec<Product>, StoreError> {
    decode_rows("products", json, |row: ProductRow| row.into_product(currency))
}

/// Decode a JSON array of category rows.
pub fn decode_categories(json: &str) -> Result<Vec<Category>, StoreError> {
    decode_rows("categories", json, |row: CategoryRow| Ok(row.into()))
}

/// Decode a JSON array of review rows.
pub fn decode_reviews(json: &str) -> Result<Vec<RatingEvent>, StoreError> {
    decode_rows("reviews", json, |row: ReviewRow| RatingEvent::try_from(row))
}

/// Decode a JSON array of voucher rows.
pub fn decode_vouchers(json: &str, currency: Currency) -> Result<Vec<Voucher>, StoreError> {
    decode_rows("vouchers", json, |row: VoucherRow| row.into_voucher(currency))
}

fn decode_rows<R, T, F>(source_name: &str, json: &str, convert: F) -> Result<Vec<T>, StoreError>
where
    R: DeserializeOwned,
    F: Fn(R) -> Result<T, String>,
{
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| StoreError::malformed(source_name, e.to_string()))?;

    let mut decoded = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let row = serde_json::from_value::<R>(value)
            .map_err(|e| e.to_string())
            .and_then(&convert);
        match row {
            Ok(item) => decoded.push(item),
            Err(reason) => warn!(source = source_name, index, %reason, "Skipping malformed row"),
        }
    }
    Ok(decoded)
}

fn amount(value: f64, currency: Currency) -> Option<Money> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(Money::from_decimal(value, currency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_products_skips_bad_rows() {
        let json = r#"[
            {"id": "p1", "name": "Ao thun", "price": 150000, "discount_price": 120000,
             "category_id": "ao", "sizes": ["M"], "colors": ["den"], "stock": 5, "sold": 30,
             "image_url": "cover.jpg", "image_urls": ["side.jpg"],
             "created_at": "2024-05-01T00:00:00Z"},
            {"id": "p2", "name": "Broken", "price": -1},
            {"id": "p3", "name": "No price"},
            {"id": "p4", "name": "Quan", "price": 90000, "category_id": null}
        ]"#;
        let products = decode_products(json, Currency::VND).unwrap();
        assert_eq!(products.len(), 2);

        let shirt = &products[0];
        assert_eq!(shirt.price, Money::new(150_000, Currency::VND));
        assert!(shirt.is_discounted());
        assert_eq!(shirt.image_urls, vec!["cover.jpg", "side.jpg"]);
        assert_eq!(shirt.sold, 30);

        assert_eq!(products[1].category_id, None);
        assert!(products[1].sizes.is_empty());
    }

    #[test]
    fn test_not_an_array_is_malformed() {
        let err = decode_products(r#"{"id": "p1"}"#, Currency::VND).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_decode_reviews_rejects_out_of_scale() {
        let json = r#"[
            {"product_id": "p1", "rating": 5, "user_id": "u1", "comment": "Dep"},
            {"product_id": "p1", "rating": 0},
            {"product_id": "p1", "rating": 9}
        ]"#;
        let reviews = decode_reviews(json).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].user_id, Some(UserId::new("u1")));
    }

    #[test]
    fn test_decode_vouchers() {
        let json = r#"[
            {"id": "v1", "code": "SALE10", "title": "Giam 10%", "discount_type": "percent",
             "discount_value": 10, "min_order_value": 200000, "max_discount": 50000,
             "user_id": null, "valid_to": "2099-01-01T00:00:00Z", "is_active": true,
             "quantity": 100, "used": 4},
            {"id": "v2", "code": "SHIP", "discount_type": "fixed", "discount_value": 30000},
            {"id": "v3", "code": "BOGO", "discount_type": "buy_x_get_y", "discount_value": 1}
        ]"#;
        let vouchers = decode_vouchers(json, Currency::VND).unwrap();
        assert_eq!(vouchers.len(), 2);
        assert_eq!(vouchers[0].discount, VoucherDiscount::Percent(10.0));
        assert_eq!(vouchers[0].remaining(), 96);
        assert_eq!(vouchers[1].title, "SHIP");
        assert!(vouchers[1].is_active);
        assert_eq!(
            vouchers[1].discount,
            VoucherDiscount::Fixed(Money::new(30_000, Currency::VND))
        );
    }

    #[test]
    fn test_decode_categories() {
        let json = r#"[{"id": "ao", "name": "Ao", "image_url": "ao.png"}, {"name": "nameless"}]"#;
        let categories = decode_categories(json).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].image_url.as_deref(), Some("ao.png"));
    }
}
