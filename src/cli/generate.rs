use super::output::{finish_output, print_markup};
use anyhow::{Context, Result};
use console::style;
use diagent_core::cli::{OutputArgs, StyleArgs};
use diagent_core::config::loader::ConfigManager;
use diagent_core::{DiagramRequest, GenerationOrchestrator, Spinner};

/// Handle the generate command
pub async fn handle_generate_command(
    config: &ConfigManager,
    instruction: &str,
    style_args: &StyleArgs,
    output: &OutputArgs,
) -> Result<()> {
    let orchestrator = GenerationOrchestrator::from_config(config)?;
    let request = DiagramRequest::new(instruction, style_args.diagram_type)
        .with_options(style_args.prompt_options());

    let spinner = Spinner::new(&format!(
        "Generating {} with {} ({})",
        request.diagram_type,
        orchestrator.provider_name(),
        orchestrator.settings().model
    ));

    let outcome = match orchestrator.generate(&request).await {
        Ok(outcome) => {
            spinner.finish_and_clear();
            outcome
        }
        Err(err) => {
            spinner.finish_with_error("Generation failed");
            return Err(err).context("diagram generation failed");
        }
    };

    print_markup(&outcome.markup);
    println!(
        "{} after {} attempt(s)",
        style("Rendered").green().bold(),
        outcome.attempts
    );
    finish_output(&outcome.diagram, output).await
}
