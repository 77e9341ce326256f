//! Product detail.

use anyhow::{bail, Result};
use chrono::Utc;
use storefront_discovery::ids::ProductId;

use super::ProductArgs;
use crate::context::Context;
use crate::output::{badge_label, price_label};

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let engine = ctx.engine().await?;
    let id = ProductId::new(args.id.as_str());

    let Some(detail) = engine.product(&id, args.stars, Utc::now()) else {
        bail!("Product not found: {}", args.id);
    };

    if ctx.output.is_json() {
        ctx.output.json(&detail);
        return Ok(());
    }

    let product = &detail.product;
    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("price", &price_label(product));
    if let Some(percent) = product.discount_percentage() {
        ctx.output.kv("discount", &format!("{:.0}%", percent));
    }
    if let Some(ref category) = detail.category {
        ctx.output.kv("category", &category.name);
    }
    if let Some(badge) = detail.badge {
        ctx.output.kv("badge", &badge_label(badge));
    }
    if !product.sizes.is_empty() {
        ctx.output.kv("sizes", &product.sizes.join(", "));
    }
    if !product.colors.is_empty() {
        ctx.output.kv("colors", &product.colors.join(", "));
    }
    if product.is_in_stock() {
        ctx.output.kv(
            "stock",
            &format!("{} in stock, {} sold", product.stock, product.sold),
        );
    } else {
        ctx.output.warn("Out of stock");
    }
    if let Some(image) = product.cover_image() {
        ctx.output.kv("image", image);
    }
    if !product.description.is_empty() {
        ctx.output.blank();
        ctx.output.info(&product.description);
    }

    let summary = &detail.summary;
    ctx.output.header("Reviews");
    match summary.average_display() {
        Some(average) => {
            ctx.output.kv(
                "average",
                &format!("{} / 5 ({} reviews)", average, summary.total_reviews),
            );
            for stars in (1..=5).rev() {
                ctx.output.kv(
                    &format!("{} star", stars),
                    &format!(
                        "{:>4} ({:.0}%)",
                        summary.distribution.count(stars),
                        summary.percentage(stars)
                    ),
                );
            }
        }
        None => ctx.output.info("No reviews yet."),
    }

    if let Some(stars) = args.stars {
        ctx.output.debug(&format!("Showing {}-star reviews only", stars));
    }
    for review in &detail.reviews {
        let date = review
            .created_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let comment = review.comment.as_deref().unwrap_or("");
        ctx.output
            .list_item(&format!("{} {} {}", review.stars(), date, comment));
    }

    if !detail.related.is_empty() {
        ctx.output.header("Related products");
        for related in &detail.related {
            ctx.output
                .list_item(&format!("{}  {}", related.name, price_label(related)));
        }
    }

    Ok(())
}
