//! Request types shared by the prompt composer and the orchestrator

use crate::diagrams::DiagramType;
use serde::{Deserialize, Serialize};

/// Presentation toggles folded into the system instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptOptions {
    pub include_title: bool,
    pub use_theme: bool,
    pub use_notes: bool,
    pub use_grouping: bool,
}

impl Default for PromptOptions {
    /// Every toggle on
    fn default() -> Self {
        Self {
            include_title: true,
            use_theme: true,
            use_notes: true,
            use_grouping: true,
        }
    }
}

impl PromptOptions {
    pub fn none() -> Self {
        Self {
            include_title: false,
            use_theme: false,
            use_notes: false,
            use_grouping: false,
        }
    }
}

/// One user submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramRequest {
    pub instruction: String,
    pub diagram_type: DiagramType,
    pub options: PromptOptions,
}

impl DiagramRequest {
    pub fn new(instruction: impl Into<String>, diagram_type: DiagramType) -> Self {
        Self {
            instruction: instruction.into(),
            diagram_type,
            options: PromptOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PromptOptions) -> Self {
        self.options = options;
        self
    }
}
