use anyhow::Result;
use console::style;
use diagent_core::MarkupDocument;
use diagent_core::cli::OutputArgs;
use diagent_core::render::RenderedDiagram;

pub fn print_markup(markup: &MarkupDocument) {
    println!(
        "{} {}",
        style("PlantUML").cyan().bold(),
        style(format!("(@start{}, {} lines)", markup.kind(), markup.line_count())).dim()
    );
    println!("{markup}");
    println!();
}

/// Save the image if asked, then drop the transient files unless `--keep`
pub async fn finish_output(diagram: &RenderedDiagram, output: &OutputArgs) -> Result<()> {
    if let Some(destination) = &output.save {
        let saved = diagram.save_to(destination).await?;
        println!("{} {}", style("Saved").green().bold(), saved.display());
    }

    if output.keep {
        println!(
            "{} {}",
            style("Image").green().bold(),
            diagram.image_path.display()
        );
        println!(
            "{} {}",
            style("Markup").green().bold(),
            diagram.markup_path.display()
        );
    } else {
        diagram.cleanup().await?;
    }
    Ok(())
}
