//! Per-session state for the interactive loop

use crate::agent::{GenerationError, GenerationOrchestrator, GenerationOutcome};
use crate::markup::MarkupDocument;
use crate::render::{RenderFailure, RenderedDiagram};
use crate::types::DiagramRequest;

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("edited text has no @start/@end block, nothing to render")]
    NotRenderable,
    #[error(transparent)]
    Render(#[from] RenderFailure),
}

impl EditError {
    /// Whether the failed edit removed the files of the previous render
    pub fn cleared_output(&self) -> bool {
        matches!(self, EditError::Render(_))
    }
}

/// What the user is currently working on. Handlers take it by `&mut`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramSession {
    pub current_markup: Option<MarkupDocument>,
    pub current_instruction: String,
}

impl DiagramSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate from a fresh instruction. Markup is replaced only on success.
    pub async fn handle_generate(
        &mut self,
        orchestrator: &GenerationOrchestrator,
        request: &DiagramRequest,
    ) -> Result<GenerationOutcome, GenerationError> {
        self.current_instruction = request.instruction.clone();
        let outcome = orchestrator.generate(request).await?;
        self.current_markup = Some(outcome.markup.clone());
        Ok(outcome)
    }

    /// Re-render after the user edited the markup by hand
    pub async fn handle_edit(
        &mut self,
        orchestrator: &GenerationOrchestrator,
        edited: &str,
    ) -> Result<RenderedDiagram, EditError> {
        let markup = MarkupDocument::parse(edited).ok_or(EditError::NotRenderable)?;
        let diagram = orchestrator.render_markup(&markup).await?;
        self.current_markup = Some(markup);
        Ok(diagram)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
