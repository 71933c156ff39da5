//! Command-line arguments

use crate::diagrams::DiagramType;
use crate::types::PromptOptions;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Turn plain-English descriptions into rendered PlantUML diagrams
#[derive(Parser, Debug)]
#[command(
    name = "diagent",
    version,
    about = "Turn natural-language descriptions into PlantUML diagrams\n\n**Quick Start:**\n  export OPENAI_API_KEY=\"your_key\"\n  diagent generate \"Alice sends Bob a message\" --type sequence"
)]
pub struct Cli {
    /// **LLM model ID**, e.g. `gpt-4o` or `claude-3-5-sonnet-20241022`
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// **LLM provider**: `openai` or `anthropic`
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// **API key environment variable** overriding the provider's default
    #[arg(long, global = true)]
    pub api_key_env: Option<String>,

    /// **Workspace root directory**; relative output paths resolve against it
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// **Configuration file path** (default: ./diagent.toml, ~/.diagent/diagent.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// **Enable verbose logging** (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a diagram from a description
    Generate {
        /// What the diagram should show
        #[arg(required = true)]
        instruction: Vec<String>,

        #[command(flatten)]
        style: StyleArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render an existing PlantUML file without calling the model
    Render {
        /// Markup file containing an @start/@end block
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the supported diagram types
    Types,

    /// Write a default diagent.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Write to ~/.diagent/ instead of the workspace
        #[arg(long)]
        global: bool,
    },

    /// Interactive loop: describe, generate, edit, save
    Session {
        #[command(flatten)]
        style: StyleArgs,
    },
}

/// Diagram type and prompt toggles
#[derive(Args, Debug, Clone, Default)]
pub struct StyleArgs {
    /// Diagram type slug or label (see `diagent types`)
    #[arg(short = 't', long = "type", default_value = "auto")]
    pub diagram_type: DiagramType,

    /// Don't ask for a title
    #[arg(long)]
    pub no_title: bool,

    /// Don't ask for the aws-orange theme
    #[arg(long)]
    pub no_theme: bool,

    /// Don't ask for explanatory notes
    #[arg(long)]
    pub no_notes: bool,

    /// Don't ask for group or card blocks
    #[arg(long)]
    pub no_grouping: bool,
}

impl StyleArgs {
    pub fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            include_title: !self.no_title,
            use_theme: !self.no_theme,
            use_notes: !self.no_notes,
            use_grouping: !self.no_grouping,
        }
    }
}

/// What happens to the rendered files
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Copy the image here (a directory gets a timestamped file name)
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Leave the transient .puml/.png files in the output directory
    #[arg(long)]
    pub keep: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_parses_type_and_toggles() {
        let cli = Cli::parse_from([
            "diagent",
            "generate",
            "Alice",
            "sends",
            "Bob",
            "a",
            "message",
            "--type",
            "sequence",
            "--no-theme",
            "--keep",
        ]);
        let Some(Commands::Generate {
            instruction,
            style,
            output,
        }) = cli.command
        else {
            panic!("expected generate");
        };
        assert_eq!(instruction.join(" "), "Alice sends Bob a message");
        assert_eq!(style.diagram_type, DiagramType::Sequence);
        let options = style.prompt_options();
        assert!(options.include_title);
        assert!(!options.use_theme);
        assert!(output.keep);
        assert!(output.save.is_none());
    }

    #[test]
    fn type_defaults_to_auto() {
        let cli = Cli::parse_from(["diagent", "session"]);
        let Some(Commands::Session { style }) = cli.command else {
            panic!("expected session");
        };
        assert_eq!(style.diagram_type, DiagramType::Auto);
        assert_eq!(style.prompt_options(), PromptOptions::default());
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(Cli::try_parse_from(["diagent", "generate", "x", "--type", "pie"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["diagent", "types", "--verbose", "--provider", "anthropic"]);
        assert!(cli.verbose);
        assert_eq!(cli.provider.as_deref(), Some("anthropic"));
    }
}
