//! # diagent-core - natural language to PlantUML
//!
//! `diagent-core` turns a plain-English description into a rendered diagram:
//! it asks an LLM for PlantUML, pulls the markup block out of the reply, runs
//! the PlantUML renderer on it, and retries a bounded number of times when
//! either step comes back empty-handed.
//!
//! ## Highlights
//!
//! - **Provider Abstraction**: one `LLMProvider` trait with OpenAI and
//!   Anthropic adapters.
//! - **Diagram Catalog**: 23 diagram types, each with the example template
//!   that seeds the system instruction.
//! - **Deterministic Rendering**: PlantUML runs in pipe mode, so the image
//!   always lands at `<output_dir>/<file_stem>.png`.
//! - **Configuration-First**: everything is driven by `diagent.toml`, with
//!   constants centralized in `config::constants`.
//!
//! ## Architecture Overview
//!
//! - `markup/`: extraction of the `@start… @end…` block.
//! - `diagrams`: the diagram-type catalog.
//! - `prompts/`: system and user instruction composition.
//! - `llm/`: provider clients and request shaping.
//! - `render/`: the renderer trait and the PlantUML subprocess implementation.
//! - `agent/`: the bounded generate → extract → render loop.
//! - `session`: per-session state for the interactive surface.
//! - `config/`: configuration loader, defaults, and API key lookup.
//!
//! ## Quickstart
//!
//! ```rust,no_run
//! use diagent_core::{ConfigManager, DiagramRequest, DiagramType, GenerationOrchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let config = ConfigManager::load()?;
//!     let orchestrator = GenerationOrchestrator::from_config(&config)?;
//!
//!     let request = DiagramRequest::new("Alice sends Bob a message", DiagramType::Sequence);
//!     let outcome = orchestrator.generate(&request).await?;
//!     println!("{}", outcome.diagram.image_path.display());
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod diagrams;
pub mod llm;
pub mod markup;
pub mod prompts;
pub mod render;
pub mod session;
pub mod types;
pub mod ui;

pub use agent::{
    AttemptContext, AttemptFailure, GenerationError, GenerationOrchestrator, GenerationOutcome,
    GenerationSettings,
};
pub use cli::args::{Cli, Commands};
pub use config::{AgentConfig, ConfigManager, DiagentConfig, RendererConfig};
pub use diagrams::DiagramType;
pub use llm::{LLMError, LLMProvider};
pub use markup::{MarkupDocument, extract_markup};
pub use prompts::{compose_system_instruction, compose_user_instruction};
pub use render::{
    DiagramRenderer, PlantUmlRenderer, RenderError, RenderFailure, RenderOutcome, RenderedDiagram,
};
pub use session::{DiagramSession, EditError};
pub use types::{DiagramRequest, PromptOptions};
pub use ui::Spinner;
