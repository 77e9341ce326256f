//! Autocomplete suggestions.

use anyhow::Result;
use storefront_discovery::search::suggestions;

use super::SuggestArgs;
use crate::context::Context;
use crate::output::price_label;

/// Run the suggest command.
pub async fn run(args: SuggestArgs, ctx: &Context) -> Result<()> {
    let engine = ctx.engine().await?;
    let limit = engine.config().suggestion_limit;
    let matches = suggestions(&engine.snapshot().products, &args.text, limit);

    if ctx.output.is_json() {
        ctx.output.json(&matches);
        return Ok(());
    }

    if matches.is_empty() {
        ctx.output
            .info(&format!("No products match '{}'.", args.text.trim()));
        return Ok(());
    }

    ctx.output.header(&format!("Suggestions for '{}'", args.text.trim()));
    for product in matches {
        ctx.output
            .list_item(&format!("{}  {}", product.name, price_label(product)));
    }

    Ok(())
}
