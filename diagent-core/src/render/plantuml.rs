use super::{DiagramRenderer, RenderError, RenderFailure, RenderedDiagram};
use crate::config::constants::{paths, plantuml};
use crate::config::core::RendererConfig;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Runs PlantUML in pipe mode: markup file on stdin, PNG bytes on stdout.
///
/// Pipe mode keeps the image name fixed at `<file_stem>.png` no matter what
/// the markup calls its diagram, so nothing has to scan the output directory.
#[derive(Debug, Clone)]
pub struct PlantUmlRenderer {
    config: RendererConfig,
}

impl PlantUmlRenderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn markup_path(&self) -> PathBuf {
        self.file_with_extension(paths::MARKUP_EXTENSION)
    }

    pub fn image_path(&self) -> PathBuf {
        self.file_with_extension(paths::IMAGE_EXTENSION)
    }

    fn file_with_extension(&self, extension: &str) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}.{extension}", self.config.file_stem))
    }

    async fn write_markup(&self, markup: &str) -> Result<PathBuf, RenderError> {
        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|e| {
                RenderError::Io(format!("{}: {e}", self.config.output_dir.display()))
            })?;

        let markup_path = self.markup_path();
        tokio::fs::write(&markup_path, markup)
            .await
            .map_err(|e| RenderError::Io(format!("{}: {e}", markup_path.display())))?;
        Ok(markup_path)
    }

    async fn build_command(&self, markup_path: &Path) -> Result<Command, RenderError> {
        let (program, leading_args) = self
            .config
            .command
            .split_first()
            .ok_or_else(|| RenderError::Spawn {
                program: String::new(),
                message: "renderer command is empty".to_string(),
            })?;

        let input = tokio::fs::File::open(markup_path)
            .await
            .map_err(|e| RenderError::Io(format!("{}: {e}", markup_path.display())))?
            .into_std()
            .await;

        let mut cmd = Command::new(program);
        cmd.args(leading_args)
            .arg(plantuml::PIPE_FLAG)
            .arg(plantuml::PNG_FLAG)
            .arg(plantuml::CHARSET_FLAG)
            .arg(plantuml::CHARSET)
            .stdin(Stdio::from(input))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        Ok(cmd)
    }

    /// One renderer invocation; writes the image only when the renderer succeeded
    async fn invoke_once(&self, markup_path: &Path, image_path: &Path) -> Result<(), RenderError> {
        remove_if_present(image_path)
            .await
            .map_err(|e| RenderError::Io(format!("{}: {e}", image_path.display())))?;

        let mut cmd = self.build_command(markup_path).await?;
        let child = cmd.spawn().map_err(|e| RenderError::Spawn {
            program: self.config.command.first().cloned().unwrap_or_default(),
            message: e.to_string(),
        })?;

        let waited = match self.config.timeout() {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| RenderError::Timeout(limit))?,
            None => child.wait_with_output().await,
        };
        let output = waited.map_err(|e| RenderError::Io(format!("waiting for renderer: {e}")))?;

        tracing::debug!(
            status = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "renderer exited"
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RenderError::NonZeroExit {
                code: output.status.code(),
                stderr: if stderr.is_empty() {
                    "no error output".to_string()
                } else {
                    stderr
                },
            });
        }

        if output.stdout.is_empty() {
            return Err(RenderError::MissingOutput);
        }

        tokio::fs::write(image_path, &output.stdout)
            .await
            .map_err(|e| RenderError::Io(format!("{}: {e}", image_path.display())))
    }
}

#[async_trait]
impl DiagramRenderer for PlantUmlRenderer {
    async fn render(&self, markup: &str) -> Result<RenderedDiagram, RenderFailure> {
        let markup_path = self
            .write_markup(markup)
            .await
            .map_err(|last| RenderFailure { attempts: 0, last })?;
        let image_path = self.image_path();
        let max_attempts = self.config.max_attempts.max(1);

        let mut last = RenderError::MissingOutput;
        let mut attempts = 0;
        for attempt in 1..=max_attempts {
            match self.invoke_once(&markup_path, &image_path).await {
                Ok(()) => {
                    tracing::debug!(attempt, image = %image_path.display(), "rendered diagram");
                    return Ok(RenderedDiagram {
                        markup_path,
                        image_path,
                        attempts: attempt,
                    });
                }
                Err(err) if !err.is_retryable() => {
                    tracing::warn!(attempt, error = %err, "renderer could not be started");
                    attempts = attempt;
                    last = err;
                    break;
                }
                Err(err) => {
                    tracing::warn!(attempt, max_attempts, error = %err, "renderer attempt failed");
                    attempts = attempt;
                    last = err;
                }
            }
        }

        for path in [&markup_path, &image_path] {
            if let Err(e) = remove_if_present(path).await {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove render file");
            }
        }

        Err(RenderFailure { attempts, last })
    }
}

async fn remove_if_present(path: &Path) -> std::io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
