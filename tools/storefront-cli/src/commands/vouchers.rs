//! Voucher listing.

use anyhow::{anyhow, Result};
use chrono::Utc;
use serde::Serialize;
use storefront_discovery::ids::UserId;
use storefront_discovery::money::Money;
use storefront_discovery::voucher::{eligible_vouchers, Voucher};

use super::VouchersArgs;
use crate::context::Context;

#[derive(Serialize)]
struct VoucherLine<'a> {
    #[serde(flatten)]
    voucher: &'a Voucher,
    label: String,
    remaining: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<Money>,
}

/// Run the vouchers command.
pub async fn run(args: VouchersArgs, ctx: &Context) -> Result<()> {
    let engine = ctx.engine().await?;
    let viewer = args.user.map(UserId::new).or_else(|| ctx.viewer());
    let currency = engine.config().currency;

    let order_total = args
        .order_total
        .as_deref()
        .map(|input| {
            Money::parse_decimal(input, currency)
                .ok_or_else(|| anyhow!("Invalid order total: '{}'", input))
        })
        .transpose()?;

    let lines: Vec<VoucherLine> = eligible_vouchers(
        &engine.snapshot().vouchers,
        viewer.as_ref(),
        Utc::now(),
    )
    .into_iter()
    .map(|voucher| VoucherLine {
        label: voucher.label(),
        remaining: voucher.remaining(),
        preview: order_total
            .as_ref()
            .and_then(|total| voucher.discount_preview(total)),
        voucher,
    })
    .collect();

    if ctx.output.is_json() {
        ctx.output.json(&lines);
        return Ok(());
    }

    match viewer {
        Some(ref user) => ctx.output.header(&format!("Vouchers for {}", user)),
        None => ctx.output.header("Public vouchers"),
    }

    if lines.is_empty() {
        ctx.output.info("No vouchers available.");
        return Ok(());
    }

    for line in &lines {
        let voucher = line.voucher;
        ctx.output.blank();
        ctx.output
            .success(&format!("{}  {}", voucher.code, line.label));
        ctx.output.kv("title", &voucher.title);
        if let Some(ref description) = voucher.description {
            ctx.output.kv("description", description);
        }
        ctx.output
            .kv("min order", &voucher.min_order_value.display());
        if let Some(cap) = voucher.max_discount {
            ctx.output.kv("max discount", &cap.display());
        }
        if let Some(valid_to) = voucher.valid_to {
            ctx.output
                .kv("valid until", &valid_to.format("%Y-%m-%d %H:%M").to_string());
        }
        ctx.output.kv("remaining", &line.remaining.to_string());

        if let Some(total) = order_total {
            match line.preview {
                Some(amount) => ctx.output.kv(
                    "you save",
                    &format!("{} on {}", amount.display(), total.display()),
                ),
                None => ctx.output.kv(
                    "you save",
                    &format!("nothing yet (order below {})", voucher.min_order_value.display()),
                ),
            }
        }
    }

    Ok(())
}
