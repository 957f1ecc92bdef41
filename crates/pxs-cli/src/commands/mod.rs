//! Command handlers for `pxs`.
//!
//! Shared config and bounds helpers live here; command logic lives in the
//! submodules.

pub mod propose;
pub mod quantity;
pub mod render;

use anyhow::{Context, Result};
use clap::Args;
use pxs_config::{report_unused_keys, AppConfig, ConfigSurface, UnusedKeyPolicy};
use pxs_quantity::QuantityBounds;
use serde_json::Value;
use tracing::warn;

/// Validated typed config plus the merged document it came from.
pub struct CliConfig {
    pub app: AppConfig,
    pub raw: Value,
}

/// `--min/--max` override, else config, else defaults.
#[derive(Args, Debug, Clone)]
pub struct BoundsArgs {
    #[arg(long)]
    pub min: Option<f64>,

    #[arg(long)]
    pub max: Option<f64>,

    /// Optional layered config supplying bounds and control style
    #[arg(long = "config", num_args = 1..)]
    pub config_paths: Vec<String>,
}

impl BoundsArgs {
    pub fn resolve(&self) -> Result<(QuantityBounds, AppConfig)> {
        let cfg = if self.config_paths.is_empty() {
            AppConfig::default()
        } else {
            load_app_config(&self.config_paths)?.app
        };
        let min = self.min.unwrap_or(cfg.quantity.min);
        let max = self.max.unwrap_or(cfg.quantity.max);
        let bounds = QuantityBounds::from_f64(min, max)
            .with_context(|| format!("invalid quantity bounds min={min} max={max}"))?;
        Ok((bounds, cfg))
    }
}

/// Load + validate config for the CLI surface. Unused keys are warnings.
pub fn load_app_config(config_paths: &[String]) -> Result<CliConfig> {
    let loaded = pxs_config::load_layered_yaml(config_paths)?;

    let report = report_unused_keys(ConfigSurface::Cli, &loaded.config_json, UnusedKeyPolicy::Warn)?;
    if !report.is_clean() {
        warn!(
            surface = %report.surface,
            unused_leaf_keys = report.unused_leaf_pointers.len(),
            "CONFIG_UNUSED_KEYS"
        );
        for p in report.unused_leaf_pointers.iter().take(50) {
            warn!(unused = %p, "CONFIG_UNUSED_KEYS");
        }
    }

    let app = AppConfig::from_config_json(&loaded.config_json)?;
    Ok(CliConfig {
        app,
        raw: loaded.config_json,
    })
}
