//! Variant filter CLI
//!
//! Reads a JSON manifest, prunes its variants for playability and
//! cross-period codec compatibility, and writes the result to stdout.
//!
//! Usage: `variant-filter <manifest.json> [config.toml]`
//!        `variant-filter --generate-config <config.toml>`

use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use variant_filter::config::generate_default_config;
use variant_filter::{filter, FilterConfig, FilterError, Manifest, Result};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "variant-filter";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(manifest_path) = args.next() else {
        usage();
    };
    if manifest_path == "--generate-config" {
        let Some(config_path) = args.next() else {
            usage();
        };
        generate_default_config(&config_path)?;
        eprintln!("Wrote default configuration to {}", config_path);
        return Ok(());
    }
    let config = load_config(args.next())?;

    init_logging(config.log_level());
    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    tracing::debug!("Configuration loaded: {:?}", config);

    let content = std::fs::read_to_string(&manifest_path)?;
    let mut manifest = Manifest::from_json(&content)?;
    if manifest.periods.is_empty() {
        return Err(FilterError::EmptyManifest);
    }
    tracing::info!(
        "Loaded {}: {} periods, {} variants",
        manifest_path,
        manifest.periods.len(),
        manifest.variant_count()
    );

    filter::apply(&mut manifest, &config).await?;

    for period in &manifest.periods {
        if period.variants.is_empty() {
            tracing::warn!("Period {} has no playable variants", period.id);
        }
    }

    println!("{}", manifest.to_json_pretty()?);
    Ok(())
}

fn usage() -> ! {
    eprintln!(
        "usage: {0} <manifest.json> [config.toml]\n       {0} --generate-config <config.toml>",
        APP_NAME
    );
    std::process::exit(2);
}

fn load_config(path: Option<String>) -> Result<FilterConfig> {
    match path {
        Some(path) => FilterConfig::from_file(&path),
        None if Path::new("variant-filter.toml").exists() => {
            FilterConfig::from_file("variant-filter.toml")
        }
        None => Ok(FilterConfig::default()),
    }
}

/// Initialize logging with tracing
fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("variant_filter={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
