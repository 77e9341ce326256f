//! Product listing.

use anyhow::Result;
use chrono::Utc;
use storefront_discovery::engine::DiscoveryEngine;
use storefront_discovery::ids::CategoryId;

use super::BrowseArgs;
use crate::context::Context;
use crate::output::{badge_label, price_label, rating_label};

const COLUMNS: [usize; 4] = [10, 32, 24, 14];

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let mut engine = ctx.engine().await?;
    apply(&args, &mut engine, ctx);

    let view = engine.view(Utc::now());

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Products ({})",
        engine.selection().sort.display_name()
    ));

    if view.is_empty() {
        ctx.output.info("No products match the current filters.");
        return Ok(());
    }

    ctx.output.table_row(&["ID", "NAME", "PRICE", "RATING"], &COLUMNS);
    for product in &view.page.items {
        let name = match view.badges.get(&product.id) {
            Some(badge) => format!("{} {}", product.name, badge_label(*badge)),
            None => product.name.clone(),
        };
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &name,
                &price_label(product),
                &rating_label(view.ratings.get(&product.id)),
            ],
            &COLUMNS,
        );
    }

    let pagination = &view.page.pagination;
    ctx.output.blank();
    ctx.output.info(&format!(
        "Showing {}-{} of {} (page {} of {})",
        pagination.start_item(),
        pagination.end_item(),
        view.total_matches,
        pagination.page,
        pagination.total_pages
    ));
    if pagination.has_next {
        ctx.output
            .debug(&format!("Next page: --page {}", pagination.page + 1));
    }

    if !view.suggestions.is_empty() {
        ctx.output.header("Suggestions");
        for product in &view.suggestions {
            ctx.output.list_item(&product.name);
        }
    }

    if !view.eligible_vouchers.is_empty() {
        ctx.output.blank();
        ctx.output.info(&format!(
            "{} voucher(s) available. Run `storefront vouchers` to see them.",
            view.eligible_vouchers.len()
        ));
    }

    Ok(())
}

/// Apply the command line facets in the order a shopper would, page last.
fn apply(args: &BrowseArgs, engine: &mut DiscoveryEngine, ctx: &Context) {
    if let Some(ref category) = args.category {
        engine.set_category(Some(CategoryId::new(category.as_str())));
    }
    if let Some(ref input) = args.min_price {
        if !engine.set_price_min_input(input) {
            ctx.output
                .warn(&format!("Ignoring minimum price '{}': not a number", input));
        }
    }
    if let Some(ref input) = args.max_price {
        if !engine.set_price_max_input(input) {
            ctx.output
                .warn(&format!("Ignoring maximum price '{}': not a number", input));
        }
    }
    if let Some(ref text) = args.search {
        engine.set_search(text.as_str());
    }
    for size in &args.size {
        engine.toggle_size(size.as_str());
    }
    for color in &args.color {
        engine.toggle_color(color.as_str());
    }
    for stars in &args.rating {
        engine.toggle_rating(*stars);
    }
    if args.only_discount {
        engine.set_only_discount(true);
    }
    if let Some(sort) = args.sort {
        engine.set_sort(sort);
    }
    engine.set_page(args.page);
}
