//! Bearer-token resolution.
//!
//! Config stores the env var NAME (`api.token_env`). The value is read once
//! at startup and handed to the HTTP client; errors name the variable and
//! never the value.

use anyhow::{bail, Result};
use serde_json::Value;

use crate::app::DEFAULT_TOKEN_ENV;

/// `Debug` is redacted.
#[derive(Clone)]
pub struct ResolvedToken {
    /// Env var the token was read from.
    pub env_var: String,
    /// `None` when the variable is unset or blank.
    pub token: Option<String>,
}

impl ResolvedToken {
    pub fn into_token(self) -> Option<String> {
        self.token
    }
}

impl std::fmt::Debug for ResolvedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedToken")
            .field("env_var", &self.env_var)
            .field("token", &self.token.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

fn read_str_at(config: &Value, pointer: &str) -> Option<String> {
    let s = config.pointer(pointer)?.as_str()?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn resolve_env(var_name: &str) -> Option<String> {
    match std::env::var(var_name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Resolve the API token named by `/api/token_env`.
///
/// With `required = true` a missing token is SECRETS_MISSING; otherwise the
/// client runs unauthenticated.
pub fn resolve_api_token(config_json: &Value, required: bool) -> Result<ResolvedToken> {
    let env_var = read_str_at(config_json, "/api/token_env")
        .unwrap_or_else(|| DEFAULT_TOKEN_ENV.to_string());
    let token = resolve_env(&env_var);

    if required && token.is_none() {
        bail!(
            "SECRETS_MISSING: required env var '{}' (api bearer token) is not set or empty",
            env_var
        );
    }

    Ok(ResolvedToken { env_var, token })
}
