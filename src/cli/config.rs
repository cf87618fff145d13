// ABOUTME: CLI config command: print the effective configuration as TOML

use anyhow::{Context, Result};
use tracing::warn;

use super::{ConfigArgs, OutputFormat};
use crate::config::AppConfig;

/// Configuration to run with, plus the reason defaults were used instead of
/// the user's file. Logging is not up yet when this is resolved, so the
/// caller reports `fallback` once it is.
#[derive(Debug)]
pub struct EffectiveConfig {
    pub config: AppConfig,
    pub fallback: Option<String>,
}

/// Configuration the TUI would run with. An unreadable or invalid file falls
/// back to defaults unless `strict` is set.
pub fn effective_config(strict: bool) -> Result<EffectiveConfig> {
    resolve(AppConfig::load(), strict)
}

fn resolve(loaded: Result<AppConfig>, strict: bool) -> Result<EffectiveConfig> {
    match loaded {
        Ok(config) => Ok(EffectiveConfig {
            config,
            fallback: None,
        }),
        Err(e) if !strict => Ok(EffectiveConfig {
            config: AppConfig::default(),
            fallback: Some(format!("config unusable, falling back to defaults: {:#}", e)),
        }),
        Err(e) => Err(e),
    }
}

/// Execute the config command
pub fn execute(args: &ConfigArgs, format: OutputFormat) -> Result<()> {
    let EffectiveConfig { config, fallback } = effective_config(args.validate)?;
    if let Some(reason) = fallback {
        warn!("{}", reason);
        eprintln!("Warning: {}", reason);
    }
    let path = AppConfig::config_path()?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&config).context("Failed to serialize config")?
            );
        }
        OutputFormat::Text => {
            println!("# {}", path.display());
            print!(
                "{}",
                toml::to_string_pretty(&config).context("Failed to serialize config")?
            );
        }
    }

    if args.validate {
        eprintln!("Configuration is valid.");
    }
    Ok(())
}
