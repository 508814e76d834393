//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;
use crate::logging::effective_level;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[store]");
    ctx.output.kv("name", &ctx.config.store.name);
    ctx.output.kv(
        "low_stock_threshold",
        &ctx.config.store.low_stock_threshold.to_string(),
    );

    ctx.output.info("[catalog]");
    ctx.output.kv(
        "path",
        ctx.config.catalog.path.as_deref().unwrap_or("(demo products)"),
    );

    ctx.output.info("[logging]");
    ctx.output.kv(
        "level",
        &effective_level(&ctx.config.logging, ctx.output.is_verbose()).to_string(),
    );
    ctx.output
        .kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.default_config_path();

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

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.problems();
    let mut warnings: Vec<String> = Vec::new();

    if ctx.config_path.is_none() {
        warnings.push("No config file found, using defaults".to_string());
    }

    // Only try the catalog once the config itself is sound.
    if errors.is_empty() {
        match ctx.load_catalog() {
            Ok(catalog) if catalog.is_empty() => {
                warnings.push("Catalog has no products".to_string());
            }
            Ok(catalog) => ctx
                .output
                .debug(&format!("catalog ok: {} products", catalog.len())),
            Err(e) => {
                ctx.output.error(&format!("{:#}", e));
                bail!("Configuration has 1 error");
            }
        }
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
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid");
    Ok(())
}
