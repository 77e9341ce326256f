//! Rating overview.

use anyhow::Result;
use serde::Serialize;
use storefront_discovery::ids::ProductId;
use storefront_discovery::reviews::{aggregate_ratings, ProductRating};

use super::RatingsArgs;
use crate::context::Context;
use crate::output::rating_label;

#[derive(Serialize)]
struct RatingLine<'a> {
    product_id: &'a ProductId,
    name: &'a str,
    #[serde(flatten)]
    rating: &'a ProductRating,
}

/// Run the ratings command.
pub async fn run(args: RatingsArgs, ctx: &Context) -> Result<()> {
    let engine = ctx.engine().await?;
    let snapshot = engine.snapshot();
    let ratings = aggregate_ratings(&snapshot.reviews);

    let mut lines: Vec<RatingLine> = snapshot
        .products
        .iter()
        .filter_map(|product| {
            ratings.get(&product.id).map(|rating| RatingLine {
                product_id: &product.id,
                name: &product.name,
                rating,
            })
        })
        .collect();
    lines.sort_by(|a, b| {
        b.rating
            .average
            .total_cmp(&a.rating.average)
            .then(b.rating.count.cmp(&a.rating.count))
    });
    let unrated = snapshot.products.len() - lines.len();
    if let Some(limit) = args.limit {
        lines.truncate(limit);
    }

    if ctx.output.is_json() {
        ctx.output.json(&lines);
        return Ok(());
    }

    ctx.output.header("Ratings");
    if lines.is_empty() {
        ctx.output.info("No reviewed products.");
        return Ok(());
    }

    for line in &lines {
        ctx.output.list_item(&format!(
            "{}  {}  {}",
            line.product_id,
            line.name,
            rating_label(Some(line.rating))
        ));
    }
    if unrated > 0 {
        ctx.output
            .debug(&format!("{} product(s) have no reviews", unrated));
    }

    Ok(())
}
