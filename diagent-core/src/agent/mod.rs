//! Generation orchestration: one user request in, one rendered diagram (or a
//! terminal error) out.

pub mod attempt;
pub mod orchestrator;

pub use attempt::{AttemptContext, AttemptFailure};
pub use orchestrator::{
    GenerationError, GenerationOrchestrator, GenerationOutcome, GenerationSettings,
};
