//! # LLM Integration Layer
//!
//! A small provider abstraction over the chat APIs diagent can use to turn a
//! natural-language description into PlantUML.
//!
//! | Provider | Default model |
//! |----------|---------------|
//! | OpenAI | gpt-4-turbo-preview |
//! | Anthropic | claude-3-sonnet-20240229 |
//!
//! ```rust,no_run
//! use diagent_core::llm::{create_provider_with_config, LLMProvider, LLMRequest};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = create_provider_with_config(
//!     "openai",
//!     Some(std::env::var("OPENAI_API_KEY")?),
//!     None,
//!     None,
//! )?;
//! let request = LLMRequest::single_turn(
//!     "gpt-4-turbo-preview",
//!     "You are a professional PlantUML coder.",
//!     "Alice sends Bob a message",
//! );
//! let response = provider.generate(request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

pub mod error_display;
pub mod factory;
pub mod provider;
pub mod providers;

pub use factory::{LLMFactory, ProviderConfig, create_provider_for_model, create_provider_with_config};
pub use provider::{
    FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, Message, MessageRole, Usage,
};
pub use providers::{AnthropicProvider, OpenAIProvider};
