use super::output::print_markup;
use anyhow::{Context, Result};
use console::style;
use diagent_core::cli::StyleArgs;
use diagent_core::config::constants::paths;
use diagent_core::config::loader::ConfigManager;
use diagent_core::render::RenderedDiagram;
use diagent_core::{
    DiagramRequest, DiagramSession, GenerationOrchestrator, MarkupDocument, Spinner,
};
use dialoguer::{Confirm, Editor, Input};

/// Handle the session command: describe, generate, optionally edit and save, repeat
pub async fn handle_session_command(config: &ConfigManager, style_args: &StyleArgs) -> Result<()> {
    let orchestrator = GenerationOrchestrator::from_config(config)?;
    let mut session = DiagramSession::new();

    println!(
        "{} {} ({}), diagram type: {}",
        style("diagent session").blue().bold(),
        orchestrator.provider_name(),
        orchestrator.settings().model,
        style_args.diagram_type
    );
    println!("{}", style("Describe a diagram, or press Enter to quit.").dim());

    loop {
        let instruction: String = Input::new()
            .with_prompt("Describe")
            .allow_empty(true)
            .interact_text()
            .context("failed to read instruction")?;

        let instruction = instruction.trim();
        if instruction.is_empty() || matches!(instruction, "exit" | "quit") {
            break;
        }

        let request = DiagramRequest::new(instruction, style_args.diagram_type)
            .with_options(style_args.prompt_options());

        // A failed cycle ends here; the session keeps going.
        if let Err(err) = run_cycle(&orchestrator, &mut session, &request).await {
            println!("{} {err:#}", style("Error:").red().bold());
        }
    }

    println!("{}", style("Goodbye!").dim());
    Ok(())
}

async fn run_cycle(
    orchestrator: &GenerationOrchestrator,
    session: &mut DiagramSession,
    request: &DiagramRequest,
) -> Result<()> {
    let spinner = Spinner::new(&format!("Generating {}", request.diagram_type));
    let outcome = match session.handle_generate(orchestrator, request).await {
        Ok(outcome) => {
            spinner.finish_and_clear();
            outcome
        }
        Err(err) => {
            spinner.finish_with_error("Generation failed");
            return Err(err.into());
        }
    };

    print_markup(&outcome.markup);
    println!(
        "{} {}",
        style("Rendered").green().bold(),
        outcome.diagram.image_path.display()
    );

    let mut diagram = outcome.diagram;
    while Confirm::new()
        .with_prompt("Edit the PlantUML code?")
        .default(false)
        .interact()?
    {
        let current = session
            .current_markup
            .as_ref()
            .map(|markup| markup.to_string())
            .unwrap_or_default();
        let Some(edited) = Editor::new().extension(".puml").edit(&current)? else {
            println!("{}", style("Edit discarded").dim());
            continue;
        };

        let spinner = Spinner::new("Rendering edited code");
        match session.handle_edit(orchestrator, &edited).await {
            Ok(rerendered) => {
                spinner.finish_and_clear();
                diagram = rerendered;
                println!(
                    "{} {}",
                    style("Re-rendered").green().bold(),
                    diagram.image_path.display()
                );
            }
            Err(err) => {
                spinner.finish_with_error("Rendering failed");
                println!("{} {err}", style("Error:").red().bold());
                if err.cleared_output() {
                    if let Some(previous) = &session.current_markup {
                        diagram = restore_previous(orchestrator, previous).await?;
                    }
                }
            }
        }
    }

    let saved = offer_save(&diagram).await;
    diagram.cleanup().await?;
    saved
}

async fn restore_previous(
    orchestrator: &GenerationOrchestrator,
    previous: &MarkupDocument,
) -> Result<RenderedDiagram> {
    orchestrator
        .render_markup(previous)
        .await
        .context("failed to restore the previous diagram")
}

async fn offer_save(diagram: &RenderedDiagram) -> Result<()> {
    if !Confirm::new()
        .with_prompt("Save the image?")
        .default(true)
        .interact()?
    {
        return Ok(());
    }

    let destination: String = Input::new()
        .with_prompt("Save as")
        .default(paths::DOWNLOAD_FILE_NAME.to_string())
        .interact_text()?;
    let saved = diagram.save_to(destination.trim()).await?;
    println!("{} {}", style("Saved").green().bold(), saved.display());
    Ok(())
}
