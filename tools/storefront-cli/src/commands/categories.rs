//! Category listing.

use anyhow::Result;
use chrono::Utc;
use console::style;
use serde::Serialize;
use storefront_discovery::ids::CategoryId;

use super::CategoriesArgs;
use crate::context::Context;

#[derive(Serialize)]
struct CategoryLine<'a> {
    id: &'a CategoryId,
    name: &'a str,
    products: usize,
    hot: bool,
}

/// Run the categories command.
pub async fn run(_args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let engine = ctx.engine().await?;
    let view = engine.view(Utc::now());
    let snapshot = engine.snapshot();

    let lines: Vec<CategoryLine> = snapshot
        .categories
        .iter()
        .map(|category| CategoryLine {
            id: &category.id,
            name: &category.name,
            products: snapshot
                .products
                .iter()
                .filter(|p| p.category_id.as_ref() == Some(&category.id))
                .count(),
            hot: view.hot_categories.iter().any(|c| c.id == category.id),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&lines);
        return Ok(());
    }

    ctx.output.header("Categories");
    if lines.is_empty() {
        ctx.output.info("No categories.");
        return Ok(());
    }

    let widths = [12, 24, 10];
    ctx.output.table_row(&["ID", "NAME", "PRODUCTS"], &widths);
    for line in &lines {
        let name = if line.hot {
            format!("{} {}", line.name, style("HOT").red().bold())
        } else {
            line.name.to_string()
        };
        ctx.output.table_row(
            &[line.id.as_str(), &name, &line.products.to_string()],
            &widths,
        );
    }

    let options = &view.facet_options;
    ctx.output.blank();
    if !options.sizes.is_empty() {
        ctx.output.kv("sizes", &options.sizes.join(", "));
    }
    if !options.colors.is_empty() {
        ctx.output.kv("colors", &options.colors.join(", "));
    }
    if let Some(bounds) = options.price_bounds {
        ctx.output.kv(
            "prices",
            &format!("{} - {}", bounds.min.display(), bounds.max.display()),
        );
    }

    Ok(())
}
