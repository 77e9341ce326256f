//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let data = &ctx.config.data;
    ctx.output.blank();
    ctx.output.info("[data]");
    ctx.output.kv("products", &data.products);
    ctx.output.kv("categories", &data.categories);
    ctx.output.kv("reviews", &data.reviews);
    ctx.output.kv("vouchers", &data.vouchers);
    if let Some(ref user) = data.user_id {
        ctx.output.kv("user_id", user);
    }

    let discovery = &ctx.config.discovery;
    ctx.output.blank();
    ctx.output.info("[discovery]");
    ctx.output.kv("page_size", &discovery.page_size.to_string());
    ctx.output
        .kv("suggestion_limit", &discovery.suggestion_limit.to_string());
    ctx.output.kv("related_limit", &discovery.related_limit.to_string());
    ctx.output
        .kv("hot_category_limit", &discovery.hot_category_limit.to_string());
    ctx.output.kv("currency", discovery.currency.code());
    ctx.output
        .kv("unrated_policy", &format!("{:?}", discovery.unrated_policy));

    let badges = &discovery.badges;
    ctx.output.blank();
    ctx.output.info("[discovery.badges]");
    ctx.output
        .kv("best_seller_sold", &badges.best_seller_sold.to_string());
    ctx.output.kv("low_stock", &badges.low_stock.to_string());
    ctx.output
        .kv("new_arrival_days", &badges.new_arrival_days.to_string());

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("storefront.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = ctx.config.discovery.validate() {
        errors.push(e.to_string());
    }

    let data = &ctx.config.data;
    for (key, path) in [
        ("data.products", &data.products),
        ("data.categories", &data.categories),
        ("data.reviews", &data.reviews),
        ("data.vouchers", &data.vouchers),
    ] {
        let resolved = ctx.resolve_path(path);
        if !resolved.exists() {
            warnings.push(format!(
                "{} file not found: {} (the collection will load empty)",
                key,
                resolved.display()
            ));
        }
    }

    if data.user_id.is_none() {
        warnings.push("data.user_id is not set; only public vouchers are shown".to_string());
    }

    if ctx.config_path.is_none() {
        warnings.push("No config file found; using defaults".to_string());
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": errors.is_empty(),
            "errors": errors,
            "warnings": warnings,
        }));
    } else {
        for error in &errors {
            ctx.output.error(error);
        }
        for warning in &warnings {
            ctx.output.warn(warning);
        }
        if errors.is_empty() {
            ctx.output.success("Configuration is valid");
        }
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    Ok(())
}
