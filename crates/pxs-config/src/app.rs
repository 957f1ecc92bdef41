//! Typed view over the merged config document.

use anyhow::{bail, Result};
use pxs_quantity::{ControlStyle, QuantityBounds};
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_TOKEN_ENV: &str = "PXS_API_TOKEN";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    /// Env var NAME holding the bearer token.
    pub token_env: String,
    pub timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuantitySettings {
    /// Also the step size.
    pub min: f64,
    pub max: f64,
    pub style: ControlStyle,
}

impl Default for QuantitySettings {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 999.0,
            style: ControlStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComposerSettings {
    pub redirect_delay_ms: u64,
    pub default_proxy_fee: f64,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            redirect_delay_ms: 1500,
            default_proxy_fee: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub quantity: QuantitySettings,
    pub composer: ComposerSettings,
}

impl AppConfig {
    /// Missing sections and keys take their defaults; present keys must be
    /// well-typed and valid (CONFIG_INVALID otherwise).
    pub fn from_config_json(config_json: &Value) -> Result<AppConfig> {
        let cfg: AppConfig = match serde_json::from_value(config_json.clone()) {
            Ok(c) => c,
            Err(e) => bail!("CONFIG_INVALID: {e}"),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            bail!("CONFIG_INVALID: api.base_url must be an http(s) URL (got '{base}')");
        }
        if self.api.token_env.trim().is_empty() {
            bail!("CONFIG_INVALID: api.token_env must name an environment variable");
        }
        if self.api.timeout_ms == 0 {
            bail!("CONFIG_INVALID: api.timeout_ms must be > 0");
        }
        if let Err(e) = self.quantity_bounds() {
            bail!("CONFIG_INVALID: quantity: {e}");
        }
        let fee = self.composer.default_proxy_fee;
        if !fee.is_finite() || fee < 0.0 {
            bail!("CONFIG_INVALID: composer.default_proxy_fee must be >= 0 (got {fee})");
        }
        Ok(())
    }

    pub fn quantity_bounds(&self) -> Result<QuantityBounds, pxs_quantity::BoundsError> {
        QuantityBounds::from_f64(self.quantity.min, self.quantity.max)
    }
}
