//! The generate → extract → render loop

use super::attempt::{AttemptContext, AttemptFailure};
use crate::config::api_keys;
use crate::config::{AgentConfig, ConfigManager};
use crate::llm::{LLMError, LLMProvider, LLMRequest, create_provider_with_config};
use crate::markup::MarkupDocument;
use crate::prompts::{compose_system_instruction, compose_user_instruction};
use crate::render::{DiagramRenderer, PlantUmlRenderer, RenderFailure, RenderedDiagram};
use crate::types::DiagramRequest;
use anyhow::Context;

/// Model parameters and the attempt bound for one orchestrator
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_attempts: usize,
}

impl From<&AgentConfig> for GenerationSettings {
    fn from(config: &AgentConfig) -> Self {
        Self {
            model: config
                .resolved_model()
                .unwrap_or_else(|| config.model.clone()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_attempts: config.max_attempts,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from(&AgentConfig::default())
    }
}

/// A rendered diagram together with the markup that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub markup: MarkupDocument,
    pub diagram: RenderedDiagram,
    /// Generation attempts used, counting the successful one
    pub attempts: usize,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// The provider call itself failed; never retried
    #[error("LLM request failed: {0}")]
    Llm(#[from] LLMError),
    /// The renderer could not run at all; asking the model again would not help
    #[error("Renderer unavailable: {0}")]
    Renderer(RenderFailure),
    #[error("Failed to convert the description into a diagram after {attempts} attempt(s): {last}")]
    Exhausted {
        attempts: usize,
        last: AttemptFailure,
    },
}

pub struct GenerationOrchestrator {
    provider: Box<dyn LLMProvider>,
    renderer: Box<dyn DiagramRenderer>,
    settings: GenerationSettings,
}

impl GenerationOrchestrator {
    pub fn new(
        provider: Box<dyn LLMProvider>,
        renderer: Box<dyn DiagramRenderer>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            provider,
            renderer,
            settings,
        }
    }

    /// Wire the configured provider and a PlantUML renderer
    pub fn from_config(manager: &ConfigManager) -> anyhow::Result<Self> {
        let agent = &manager.config().agent;
        let api_key = api_keys::get_api_key(&agent.provider, &agent.api_key_env)?;
        let settings = GenerationSettings::from(agent);
        let provider = create_provider_with_config(
            &agent.provider,
            Some(api_key),
            agent.base_url.clone(),
            Some(settings.model.clone()),
        )
        .with_context(|| format!("Failed to create {} provider", agent.provider))?;

        Ok(Self::new(
            provider,
            Box::new(PlantUmlRenderer::new(manager.renderer_config())),
            settings,
        ))
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Ask the model for markup and render it, retrying up to the configured bound.
    ///
    /// Provider errors and a renderer that cannot be started end the cycle at once. A reply without a markup block or
    /// markup the renderer rejects counts as a failed attempt, and the next
    /// request tells the model what went wrong.
    pub async fn generate(
        &self,
        request: &DiagramRequest,
    ) -> Result<GenerationOutcome, GenerationError> {
        let system_instruction = compose_system_instruction(request.diagram_type, &request.options);
        let mut context = AttemptContext::first(self.settings.max_attempts.max(1));

        loop {
            tracing::info!(
                attempt = context.attempt,
                max_attempts = context.max_attempts,
                diagram_type = request.diagram_type.slug(),
                "requesting diagram markup"
            );

            let failure = match self
                .attempt(&system_instruction, &request.instruction, &context)
                .await?
            {
                Ok((markup, diagram)) => {
                    tracing::info!(
                        attempt = context.attempt,
                        kind = markup.kind(),
                        image = %diagram.image_path.display(),
                        "diagram rendered"
                    );
                    return Ok(GenerationOutcome {
                        markup,
                        diagram,
                        attempts: context.attempt,
                    });
                }
                Err(failure) => failure,
            };

            tracing::warn!(attempt = context.attempt, reason = %failure, "attempt failed");

            context = match context.next(failure.clone()) {
                Some(next) => next,
                None => {
                    return Err(GenerationError::Exhausted {
                        attempts: context.attempt,
                        last: failure,
                    });
                }
            };
        }
    }

    /// The outer `Result` is a terminal error; the inner one a retryable failure
    async fn attempt(
        &self,
        system_instruction: &str,
        instruction: &str,
        context: &AttemptContext,
    ) -> Result<Result<(MarkupDocument, RenderedDiagram), AttemptFailure>, GenerationError> {
        let llm_request = LLMRequest::single_turn(
            self.settings.model.clone(),
            system_instruction,
            compose_user_instruction(instruction, context),
        )
        .with_temperature(self.settings.temperature)
        .with_max_tokens(self.settings.max_tokens);

        let response = self.provider.generate(llm_request).await.inspect_err(|e| {
            tracing::error!(provider = self.provider.name(), error = %e, "LLM request failed");
        })?;

        let Some(markup) = MarkupDocument::parse(response.text()) else {
            tracing::debug!(reply_len = response.text().len(), "reply contained no markup");
            return Ok(Err(AttemptFailure::NoMarkup));
        };

        Ok(match self.renderer.render(markup.as_str()).await {
            Ok(diagram) => Ok((markup, diagram)),
            Err(failure) if !failure.last.is_retryable() => {
                tracing::error!(error = %failure, "renderer could not be started");
                return Err(GenerationError::Renderer(failure));
            }
            Err(failure) => Err(AttemptFailure::Render {
                markup: markup.into_string(),
                reason: failure.last.to_string(),
            }),
        })
    }

    /// Render markup the user edited, without asking the model again
    pub async fn render_markup(
        &self,
        markup: &MarkupDocument,
    ) -> Result<RenderedDiagram, RenderFailure> {
        self.renderer.render(markup.as_str()).await.inspect_err(|failure| {
            tracing::warn!(error = %failure, "edited markup failed to render");
        })
    }
}
