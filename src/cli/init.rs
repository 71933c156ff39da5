use anyhow::{Context, Result};
use console::style;
use diagent_core::config::loader::DiagentConfig;
use std::path::Path;

/// Handle the init command
pub fn handle_init_command(workspace: &Path, force: bool, global: bool) -> Result<()> {
    println!("{}", style("Initialize diagent configuration").blue().bold());

    let created = DiagentConfig::bootstrap_project(workspace, force, global)
        .context("failed to initialize configuration file")?;

    match created {
        Some(path) => println!("{} {}", style("Created").green().bold(), path.display()),
        None => println!(
            "{} a diagent.toml already exists; pass --force to overwrite it",
            style("Skipped").yellow().bold()
        ),
    }
    Ok(())
}
