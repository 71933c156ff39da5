//! API key retrieval from environment variables and `.env` files.
//!
//! Keys never live in `diagent.toml`; the config only names which variable to read.

use crate::config::constants::{env as env_names, providers};
use anyhow::{Result, anyhow};
use std::env;

/// Load environment variables from a `.env` file in the current directory, if present
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded environment variables");
            Ok(())
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            tracing::warn!(error = %e, "failed to load .env file");
            Ok(())
        }
    }
}

/// Conventional environment variable for a provider
pub fn default_env_var(provider: &str) -> Option<&'static str> {
    match provider.to_lowercase().as_str() {
        providers::OPENAI => Some(env_names::OPENAI_API_KEY),
        providers::ANTHROPIC => Some(env_names::ANTHROPIC_API_KEY),
        _ => None,
    }
}

/// Get the API key for `provider`, preferring `override_env` when it is non-empty
pub fn get_api_key(provider: &str, override_env: &str) -> Result<String> {
    resolve_api_key(provider, override_env, |name| env::var(name).ok())
}

fn resolve_api_key<F>(provider: &str, override_env: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let env_var = if override_env.trim().is_empty() {
        default_env_var(provider).ok_or_else(|| anyhow!("Unsupported provider: {provider}"))?
    } else {
        override_env.trim()
    };

    match lookup(env_var) {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(anyhow!(
            "No API key found for {provider} provider. Set the {env_var} environment variable (or add it to a .env file)"
        )),
    }
}
