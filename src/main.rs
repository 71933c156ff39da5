//! diagent - natural-language to PlantUML diagrams
//!
//! Binary entry point: parses arguments, installs logging, loads
//! configuration and dispatches to the command handlers in `cli`.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use diagent_core::cli::{Cli, Commands, StyleArgs};
use diagent_core::config::api_keys::load_dotenv;
use diagent_core::config::constants::{defaults, env, models};
use diagent_core::config::loader::ConfigManager;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);
    load_dotenv()?;

    let workspace = match &args.workspace {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("cannot determine current dir")?,
    };
    tracing::debug!(workspace = %workspace.display(), "starting diagent");

    if let Err(err) = run(&args, &workspace).await {
        tracing::debug!(error = ?err, "command failed");
        eprintln!("{} {err:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(args: &Cli, workspace: &Path) -> Result<()> {
    match &args.command {
        Some(Commands::Types) => {
            cli::handle_types_command();
            Ok(())
        }
        Some(Commands::Init { force, global }) => {
            cli::handle_init_command(workspace, *force, *global)
        }
        Some(Commands::Generate {
            instruction,
            style,
            output,
        }) => {
            let config = load_config(args, workspace)?;
            cli::handle_generate_command(&config, &instruction.join(" "), style, output).await
        }
        Some(Commands::Render { file, output }) => {
            let config = load_config(args, workspace)?;
            cli::handle_render_command(&config, file, output).await
        }
        Some(Commands::Session { style }) => {
            let config = load_config(args, workspace)?;
            cli::handle_session_command(&config, style).await
        }
        None => {
            let config = load_config(args, workspace)?;
            cli::handle_session_command(&config, &StyleArgs::default()).await
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("diagent=debug,diagent_core=debug")
    } else {
        EnvFilter::try_from_env(env::LOG_FILTER)
            .unwrap_or_else(|_| EnvFilter::new(defaults::DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load `diagent.toml` and fold the command-line overrides into it
fn load_config(args: &Cli, workspace: &Path) -> Result<ConfigManager> {
    let mut manager = match &args.config {
        Some(path) => {
            let path: PathBuf = if path.is_relative() {
                workspace.join(path)
            } else {
                path.clone()
            };
            ConfigManager::load_from_file_in(&path, workspace)?
        }
        None => ConfigManager::load_from_workspace(workspace)?,
    };

    let agent = &mut manager.config_mut().agent;
    if let Some(provider) = &args.provider {
        agent.set_provider(provider);
    }
    if let Some(model) = &args.model {
        agent.model = model.clone();
        if args.provider.is_none() {
            if let Some(provider) = models::provider_for_model(model) {
                agent.provider = provider.to_string();
            }
        }
    }
    if let Some(api_key_env) = &args.api_key_env {
        agent.api_key_env = api_key_env.clone();
    }

    manager
        .config()
        .validate()
        .context("invalid configuration after command-line overrides")?;

    if let Some(path) = manager.config_path() {
        tracing::debug!(path = %path.display(), "using configuration file");
    }
    Ok(manager)
}
