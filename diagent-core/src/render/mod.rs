//! Rendering markup into images with an external renderer
//!
//! The orchestrator only sees the [`DiagramRenderer`] trait; [`PlantUmlRenderer`]
//! is the subprocess-backed implementation.

pub mod plantuml;

pub use plantuml::PlantUmlRenderer;

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Turns markup text into an image file
#[async_trait]
pub trait DiagramRenderer: Send + Sync {
    async fn render(&self, markup: &str) -> Result<RenderedDiagram, RenderFailure>;
}

/// Why a single renderer invocation failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("failed to prepare render files: {0}")]
    Io(String),
    #[error("failed to start renderer '{program}': {message}")]
    Spawn { program: String, message: String },
    #[error("renderer exited with {}: {}", exit_label(.code), .stderr)]
    NonZeroExit { code: Option<i32>, stderr: String },
    #[error("renderer finished but produced no image")]
    MissingOutput,
    #[error("renderer timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl RenderError {
    /// Whether invoking the renderer again could succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, RenderError::Spawn { .. })
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Every attempt failed; carries the reason from the last one
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rendering failed after {attempts} attempt(s): {last}")]
pub struct RenderFailure {
    pub attempts: usize,
    pub last: RenderError,
}

/// Files left behind by a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    pub markup_path: PathBuf,
    pub image_path: PathBuf,
    pub attempts: usize,
}

impl RenderedDiagram {
    pub async fn read_bytes(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.image_path)
            .await
            .with_context(|| format!("Failed to read image: {}", self.image_path.display()))
    }

    /// Copy the image to `destination`; a directory receives a timestamped file name
    pub async fn save_to(&self, destination: impl AsRef<Path>) -> Result<PathBuf> {
        let destination = destination.as_ref();
        let target = if destination.is_dir() {
            destination.join(timestamped_file_name())
        } else {
            if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            destination.to_path_buf()
        };

        tokio::fs::copy(&self.image_path, &target)
            .await
            .with_context(|| format!("Failed to save image to {}", target.display()))?;
        Ok(target)
    }

    /// Remove the transient markup and image files
    pub async fn cleanup(&self) -> Result<()> {
        for path in [&self.markup_path, &self.image_path] {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to remove {}", path.display()));
                }
            }
        }
        Ok(())
    }
}

fn timestamped_file_name() -> String {
    format!("diagram-{}.png", chrono::Local::now().format("%Y%m%d-%H%M%S"))
}

/// Three-slot view of a render result: both paths on success, only the error otherwise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    pub markup_path: Option<PathBuf>,
    pub image_path: Option<PathBuf>,
    pub error: Option<String>,
}

impl From<Result<RenderedDiagram, RenderFailure>> for RenderOutcome {
    fn from(result: Result<RenderedDiagram, RenderFailure>) -> Self {
        match result {
            Ok(diagram) => Self {
                markup_path: Some(diagram.markup_path),
                image_path: Some(diagram.image_path),
                error: None,
            },
            Err(failure) => Self {
                markup_path: None,
                image_path: None,
                error: Some(failure.to_string()),
            },
        }
    }
}
