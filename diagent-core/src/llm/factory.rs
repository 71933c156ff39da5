use super::providers::{AnthropicProvider, OpenAIProvider};
use crate::config::constants::{models, providers};
use crate::llm::provider::{LLMError, LLMProvider};
use std::collections::HashMap;

type ProviderConstructor = Box<dyn Fn(ProviderConfig) -> Box<dyn LLMProvider> + Send + Sync>;

/// LLM provider factory and registry
pub struct LLMFactory {
    providers: HashMap<String, ProviderConstructor>,
}

#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

impl LLMFactory {
    pub fn new() -> Self {
        let mut factory = Self {
            providers: HashMap::new(),
        };

        factory.register_provider(providers::OPENAI, |config: ProviderConfig| {
            let ProviderConfig {
                api_key,
                base_url,
                model,
            } = config;
            Box::new(OpenAIProvider::from_config(api_key, model, base_url)) as Box<dyn LLMProvider>
        });

        factory.register_provider(providers::ANTHROPIC, |config: ProviderConfig| {
            let ProviderConfig {
                api_key,
                base_url,
                model,
            } = config;
            Box::new(AnthropicProvider::from_config(api_key, model, base_url))
                as Box<dyn LLMProvider>
        });

        factory
    }

    /// Register a new provider
    pub fn register_provider<F>(&mut self, name: &str, factory_fn: F)
    where
        F: Fn(ProviderConfig) -> Box<dyn LLMProvider> + Send + Sync + 'static,
    {
        self.providers
            .insert(name.to_string(), Box::new(factory_fn));
    }

    /// Create provider instance
    pub fn create_provider(
        &self,
        provider_name: &str,
        config: ProviderConfig,
    ) -> Result<Box<dyn LLMProvider>, LLMError> {
        let factory_fn = self
            .providers
            .get(&provider_name.to_lowercase())
            .ok_or_else(|| {
                LLMError::InvalidRequest(format!("Unknown provider: {provider_name}"))
            })?;

        Ok(factory_fn(config))
    }

    /// List available providers, sorted
    pub fn list_providers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Determine provider name from model string
    pub fn provider_from_model(&self, model: &str) -> Option<String> {
        models::provider_for_model(model)
            .filter(|name| self.providers.contains_key(*name))
            .map(str::to_string)
    }
}

impl Default for LLMFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Create provider from model name and API key
pub fn create_provider_for_model(
    model: &str,
    api_key: String,
) -> Result<Box<dyn LLMProvider>, LLMError> {
    let factory = LLMFactory::new();
    let provider_name = factory.provider_from_model(model).ok_or_else(|| {
        LLMError::InvalidRequest(format!("Cannot determine provider for model: {model}"))
    })?;

    factory.create_provider(
        &provider_name,
        ProviderConfig {
            api_key: Some(api_key),
            base_url: None,
            model: Some(model.to_string()),
        },
    )
}

/// Create provider with full configuration
pub fn create_provider_with_config(
    provider_name: &str,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
) -> Result<Box<dyn LLMProvider>, LLMError> {
    LLMFactory::new().create_provider(
        provider_name,
        ProviderConfig {
            api_key,
            base_url,
            model,
        },
    )
}
