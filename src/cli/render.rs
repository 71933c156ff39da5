use super::output::{finish_output, print_markup};
use anyhow::{Context, Result, bail};
use console::style;
use diagent_core::cli::OutputArgs;
use diagent_core::config::loader::ConfigManager;
use diagent_core::render::DiagramRenderer;
use diagent_core::{MarkupDocument, PlantUmlRenderer, Spinner};
use std::path::Path;

/// Handle the render command: render an existing markup file, no model involved
pub async fn handle_render_command(
    config: &ConfigManager,
    file: &Path,
    output: &OutputArgs,
) -> Result<()> {
    let path = if file.is_relative() {
        config.workspace().join(file)
    } else {
        file.to_path_buf()
    };
    let text = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read markup file: {}", path.display()))?;

    let Some(markup) = MarkupDocument::parse(&text) else {
        bail!("{} contains no @start/@end block", path.display());
    };

    let renderer = PlantUmlRenderer::new(config.renderer_config());
    let spinner = Spinner::new(&format!("Rendering {}", path.display()));
    let diagram = match renderer.render(markup.as_str()).await {
        Ok(diagram) => {
            spinner.finish_and_clear();
            diagram
        }
        Err(failure) => {
            spinner.finish_with_error("Rendering failed");
            return Err(failure.into());
        }
    };

    print_markup(&markup);
    println!(
        "{} after {} attempt(s)",
        style("Rendered").green().bold(),
        diagram.attempts
    );
    finish_output(&diagram, output).await
}
