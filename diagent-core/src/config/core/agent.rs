use crate::config::constants::{defaults, models};
use serde::{Deserialize, Serialize};

/// Generation settings: which provider to call and how hard to try
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AgentConfig {
    /// LLM provider (openai, anthropic)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier sent with every request; empty means the provider's default model
    #[serde(default)]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Number of generate-extract-render cycles before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Environment variable holding the API key; empty means the provider's conventional name
    #[serde(default)]
    pub api_key_env: String,

    /// Optional base URL override (proxies, compatible gateways)
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: String::new(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_attempts: default_max_attempts(),
            api_key_env: String::new(),
            base_url: None,
        }
    }
}

impl AgentConfig {
    /// The configured model, or the provider's default when none is set
    pub fn resolved_model(&self) -> Option<String> {
        let model = self.model.trim();
        if model.is_empty() {
            models::default_model_for(&self.provider).map(str::to_string)
        } else {
            Some(model.to_string())
        }
    }

    /// Switch provider, dropping a model that belongs to a different provider
    pub fn set_provider(&mut self, provider: &str) {
        self.provider = provider.to_string();
        let belongs_elsewhere = models::provider_for_model(&self.model)
            .is_some_and(|owner| !owner.eq_ignore_ascii_case(provider));
        if belongs_elsewhere {
            self.model.clear();
        }
    }
}

fn default_provider() -> String {
    defaults::DEFAULT_PROVIDER.to_string()
}
fn default_temperature() -> f32 {
    defaults::DEFAULT_TEMPERATURE
}
fn default_max_tokens() -> u32 {
    defaults::DEFAULT_MAX_TOKENS
}
fn default_max_attempts() -> usize {
    defaults::DEFAULT_GENERATION_ATTEMPTS
}
