//! Review events and the rating aggregates derived from them.

use std::collections::HashMap;

use crate::error::DiscoveryError;
use crate::ids::{ProductId, ReviewId, UserId};
use crate::source::ReviewRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single review as delivered by the review stream.
///
/// Deserializing goes through the storefront row format, so a rating
/// outside 1..=5 is rejected there as well as in [`RatingEvent::new`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "ReviewRow")]
pub struct RatingEvent {
    /// Review identifier, when the source provides one.
    pub id: Option<ReviewId>,
    /// Reviewed product.
    pub product_id: ProductId,
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Author.
    pub user_id: Option<UserId>,
    /// Free-text comment.
    pub comment: Option<String>,
    /// Submission time.
    pub created_at: Option<DateTime<Utc>>,
}

impl RatingEvent {
    /// Create an event, rejecting ratings outside 1..=5.
    pub fn new(product_id: impl Into<ProductId>, rating: i64) -> Result<Self, DiscoveryError> {
        if !(1..=5).contains(&rating) {
            return Err(DiscoveryError::InvalidRating(rating));
        }
        Ok(Self {
            id: None,
            product_id: product_id.into(),
            rating: rating as u8,
            user_id: None,
            comment: None,
            created_at: None,
        })
    }

    /// Set the submission time.
    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Render the rating as filled and empty stars.
    pub fn stars(&self) -> String {
        let filled = self.rating.min(5) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

/// Average rating and review count for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductRating {
    pub average: f64,
    pub count: u32,
}

impl ProductRating {
    /// Average rounded to the nearest whole star.
    pub fn rounded_stars(&self) -> u8 {
        self.average.round().clamp(0.0, 5.0) as u8
    }
}

/// Per-product rating aggregates.
///
/// Products without reviews are absent. Absence is never a zero-star rating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingAggregate {
    ratings: HashMap<ProductId, ProductRating>,
}

impl RatingAggregate {
    /// Rating for a product, if it has any reviews.
    pub fn get(&self, product_id: &ProductId) -> Option<&ProductRating> {
        self.ratings.get(product_id)
    }

    /// Average rating for a product, if it has any reviews.
    pub fn average(&self, product_id: &ProductId) -> Option<f64> {
        self.get(product_id).map(|r| r.average)
    }

    /// Number of rated products.
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Iterate over rated products.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &ProductRating)> {
        self.ratings.iter()
    }
}

/// Reduce review events to one average per product.
///
/// Single pass over the events; order does not matter beyond float rounding.
pub fn aggregate_ratings<'a, I>(events: I) -> RatingAggregate
where
    I: IntoIterator<Item = &'a RatingEvent>,
{
    let mut sums: HashMap<ProductId, (u64, u32)> = HashMap::new();
    for event in events {
        let entry = sums.entry(event.product_id.clone()).or_insert((0, 0));
        entry.0 += u64::from(event.rating);
        entry.1 += 1;
    }

    let ratings = sums
        .into_iter()
        .map(|(id, (sum, count))| {
            let average = sum as f64 / f64::from(count);
            (id, ProductRating { average, count })
        })
        .collect();

    RatingAggregate { ratings }
}

/// Distribution of ratings (1-5 stars).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDistribution {
    pub five_star: u32,
    pub four_star: u32,
    pub three_star: u32,
    pub two_star: u32,
    pub one_star: u32,
}

impl RatingDistribution {
    fn record(&mut self, stars: u8) {
        match stars {
            5 => self.five_star += 1,
            4 => self.four_star += 1,
            3 => self.three_star += 1,
            2 => self.two_star += 1,
            1 => self.one_star += 1,
            _ => {}
        }
    }

    /// Count for a rating level.
    pub fn count(&self, stars: u8) -> u32 {
        match stars {
            5 => self.five_star,
            4 => self.four_star,
            3 => self.three_star,
            2 => self.two_star,
            1 => self.one_star,
            _ => 0,
        }
    }
}

/// Review summary for a product detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub product_id: ProductId,
    /// None when the product has no reviews.
    pub average: Option<f64>,
    pub total_reviews: u32,
    pub distribution: RatingDistribution,
}

impl RatingSummary {
    /// Summarize the events that belong to `product_id`.
    pub fn from_events(product_id: &ProductId, events: &[RatingEvent]) -> Self {
        let mut distribution = RatingDistribution::default();
        let mut sum = 0u64;
        let mut total = 0u32;
        for event in events.iter().filter(|e| &e.product_id == product_id) {
            distribution.record(event.rating);
            sum += u64::from(event.rating);
            total += 1;
        }

        Self {
            product_id: product_id.clone(),
            average: (total > 0).then(|| sum as f64 / f64::from(total)),
            total_reviews: total,
            distribution,
        }
    }

    /// Average with one decimal place, e.g. "4.3".
    pub fn average_display(&self) -> Option<String> {
        self.average.map(|avg| format!("{:.1}", avg))
    }

    /// Share of reviews at a rating level, in percent.
    pub fn percentage(&self, stars: u8) -> f64 {
        if self.total_reviews == 0 {
            return 0.0;
        }
        f64::from(self.distribution.count(stars)) / f64::from(self.total_reviews) * 100.0
    }
}

/// Reviews for one product, newest first, optionally only one star value.
///
/// Reviews without a timestamp sort last.
pub fn reviews_with_stars<'a>(
    events: &'a [RatingEvent],
    product_id: &ProductId,
    stars: Option<u8>,
) -> Vec<&'a RatingEvent> {
    let mut reviews: Vec<&RatingEvent> = events
        .iter()
        .filter(|e| &e.product_id == product_id)
        .filter(|e| stars.map_or(true, |s| e.rating == s))
        .collect();
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    reviews
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(product: &str, rating: i64) -> RatingEvent {
        RatingEvent::new(product, rating).unwrap()
    }

    #[test]
    fn test_average_and_count() {
        let events = vec![event("p1", 3), event("p1", 5), event("p2", 4)];
        let agg = aggregate_ratings(&events);

        let p1 = agg.get(&ProductId::new("p1")).unwrap();
        assert_eq!(p1.average, 4.0);
        assert_eq!(p1.count, 2);
        assert_eq!(agg.average(&ProductId::new("p2")), Some(4.0));
        assert_eq!(agg.len(), 2);
    }

    #[test]
    fn test_unreviewed_product_is_absent() {
        let agg = aggregate_ratings(&[event("p1", 5)]);
        assert!(agg.get(&ProductId::new("p9")).is_none());
        assert!(aggregate_ratings(&[]).is_empty());
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let forward = vec![event("p1", 1), event("p1", 2), event("p1", 5)];
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(aggregate_ratings(&forward), aggregate_ratings(&backward));
        assert_eq!(aggregate_ratings(&forward), aggregate_ratings(&forward));
    }

    #[test]
    fn test_rating_out_of_scale_rejected() {
        assert!(matches!(
            RatingEvent::new("p1", 0),
            Err(DiscoveryError::InvalidRating(0))
        ));
        assert!(RatingEvent::new("p1", 6).is_err());
    }

    #[test]
    fn test_deserialize_checks_scale() {
        let event: RatingEvent =
            serde_json::from_str(r#"{"product_id": "p1", "rating": 4, "comment": "ok"}"#).unwrap();
        assert_eq!(event.rating, 4);
        assert_eq!(event.comment.as_deref(), Some("ok"));

        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(serde_json::from_str::<RatingEvent>(&json).unwrap(), event);

        for bad in [9, 0, -1] {
            let json = format!(r#"{{"product_id": "p1", "rating": {bad}}}"#);
            assert!(serde_json::from_str::<RatingEvent>(&json).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_rounded_stars() {
        let r = ProductRating { average: 3.5, count: 2 };
        assert_eq!(r.rounded_stars(), 4);
        let r = ProductRating { average: 3.49, count: 3 };
        assert_eq!(r.rounded_stars(), 3);
    }

    #[test]
    fn test_summary_distribution() {
        let events = vec![
            event("p1", 5),
            event("p1", 5),
            event("p1", 5),
            event("p1", 1),
            event("p2", 2),
        ];
        let summary = RatingSummary::from_events(&ProductId::new("p1"), &events);
        assert_eq!(summary.total_reviews, 4);
        assert_eq!(summary.distribution.five_star, 3);
        assert_eq!(summary.distribution.two_star, 0);
        assert_eq!(summary.average_display().as_deref(), Some("4.0"));
        assert!((summary.percentage(5) - 75.0).abs() < 1e-9);

        let empty = RatingSummary::from_events(&ProductId::new("p3"), &events);
        assert_eq!(empty.average, None);
        assert_eq!(empty.percentage(5), 0.0);
    }

    #[test]
    fn test_reviews_with_stars_newest_first() {
        let day = |d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();
        let events = vec![
            event("p1", 5).at(day(1)),
            event("p1", 3).at(day(3)),
            event("p1", 5).at(day(2)),
            event("p2", 5).at(day(4)),
        ];
        let p1 = ProductId::new("p1");

        let all = reviews_with_stars(&events, &p1, None);
        let ratings: Vec<u8> = all.iter().map(|e| e.rating).collect();
        assert_eq!(ratings, vec![3, 5, 5]);

        let fives = reviews_with_stars(&events, &p1, Some(5));
        assert_eq!(fives.len(), 2);
        assert_eq!(fives[0].created_at, Some(day(2)));
    }

    #[test]
    fn test_stars_rendering() {
        assert_eq!(event("p1", 3).stars(), "★★★☆☆");
    }
}
