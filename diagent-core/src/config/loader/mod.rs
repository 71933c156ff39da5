use crate::config::constants::{models, paths};
use crate::config::core::{AgentConfig, RendererConfig};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for diagent
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DiagentConfig {
    /// LLM provider and generation loop settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// External renderer settings
    #[serde(default)]
    pub renderer: RendererConfig,
}

impl DiagentConfig {
    /// Write a default `diagent.toml` into the workspace (or `~/.diagent/`)
    pub fn bootstrap_project<P: AsRef<Path>>(
        workspace: P,
        force: bool,
        use_home_dir: bool,
    ) -> Result<Option<PathBuf>> {
        let workspace = workspace.as_ref();

        let config_path = if use_home_dir {
            match ConfigManager::get_home_dir() {
                Some(home_dir) => {
                    let diagent_dir = home_dir.join(paths::HOME_DIR_NAME);
                    if !diagent_dir.exists() {
                        fs::create_dir_all(&diagent_dir).with_context(|| {
                            format!("Failed to create directory: {}", diagent_dir.display())
                        })?;
                    }
                    diagent_dir.join(paths::CONFIG_FILE_NAME)
                }
                None => workspace.join(paths::CONFIG_FILE_NAME),
            }
        } else {
            workspace.join(paths::CONFIG_FILE_NAME)
        };

        if config_path.exists() && !force {
            return Ok(None);
        }

        Self::create_sample_config(&config_path)?;
        Ok(Some(config_path))
    }

    /// Serialize the defaults to `output`, with a comment above each key
    pub fn create_sample_config<P: AsRef<Path>>(output: P) -> Result<()> {
        let output = output.as_ref();
        let config_content = toml::to_string_pretty(&DiagentConfig::default())
            .context("Failed to serialize default configuration")?;

        let content = format!(
            "# diagent configuration\n# API keys are read from the environment (OPENAI_API_KEY / ANTHROPIC_API_KEY) or a .env file.\n\n{}",
            annotate_sample(&config_content)
        );

        fs::write(output, content)
            .with_context(|| format!("Failed to write config file: {}", output.display()))?;

        Ok(())
    }

    /// Reject settings the generation loop cannot run with
    pub fn validate(&self) -> Result<()> {
        let provider = self.agent.provider.to_lowercase();
        if models::default_model_for(&provider).is_none() {
            bail!(
                "agent.provider '{}' is not supported (use openai or anthropic)",
                self.agent.provider
            );
        }
        if let Some(owner) = models::provider_for_model(&self.agent.model) {
            if owner != provider {
                bail!(
                    "agent.model '{}' is served by {owner}, not {}",
                    self.agent.model,
                    self.agent.provider
                );
            }
        }
        if self.agent.max_attempts == 0 {
            bail!("agent.max_attempts must be at least 1");
        }
        if self.renderer.max_attempts == 0 {
            bail!("renderer.max_attempts must be at least 1");
        }
        if self.renderer.command.first().is_none_or(|program| program.trim().is_empty()) {
            bail!("renderer.command must name a program");
        }
        if self.renderer.file_stem.trim().is_empty() {
            bail!("renderer.file_stem cannot be empty");
        }
        if !(0.0..=2.0).contains(&self.agent.temperature) {
            bail!(
                "agent.temperature must be between 0.0 and 2.0, got {}",
                self.agent.temperature
            );
        }
        Ok(())
    }
}

/// Comment lines written above each key of the sample config, per section
const SAMPLE_COMMENTS: &[(&str, &str, &str)] = &[
    ("agent", "provider", "LLM provider: openai or anthropic"),
    (
        "agent",
        "model",
        "Model ID; leave empty for the provider's default (gpt-4-turbo-preview / claude-3-sonnet-20240229)",
    ),
    ("agent", "temperature", "Sampling temperature, 0.0 to 2.0"),
    ("agent", "max_tokens", "Upper bound on tokens per reply"),
    (
        "agent",
        "max_attempts",
        "Generate-extract-render cycles per request before giving up (at least 1)",
    ),
    (
        "agent",
        "api_key_env",
        "Environment variable holding the API key; empty uses OPENAI_API_KEY / ANTHROPIC_API_KEY",
    ),
    (
        "renderer",
        "command",
        "Renderer program and leading arguments, one argv entry per string",
    ),
    (
        "renderer",
        "output_dir",
        "Directory for the transient .puml and .png files, relative to the workspace",
    ),
    ("renderer", "file_stem", "Shared file name of the .puml and .png files"),
    (
        "renderer",
        "max_attempts",
        "Renderer invocations per render before giving up (at least 1)",
    ),
    (
        "renderer",
        "timeout_seconds",
        "Kill a renderer running longer than this; 0 means no timeout",
    ),
];

fn annotate_sample(content: &str) -> String {
    let mut section = "";
    let mut annotated = String::with_capacity(content.len() * 2);

    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(name) = trimmed.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            section = name;
        } else if let Some((key, _)) = trimmed.split_once('=') {
            let key = key.trim();
            if let Some((_, _, comment)) = SAMPLE_COMMENTS
                .iter()
                .find(|(s, k, _)| *s == section && *k == key)
            {
                annotated.push_str("# ");
                annotated.push_str(comment);
                annotated.push('\n');
            }
        }
        annotated.push_str(line);
        annotated.push('\n');
    }

    annotated
}

/// Configuration manager for loading and validating configurations
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: DiagentConfig,
    config_path: Option<PathBuf>,
    workspace: PathBuf,
}

impl ConfigManager {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from_workspace(std::env::current_dir()?)
    }

    /// Get the user's home directory path
    fn get_home_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home));
        }

        if let Ok(userprofile) = std::env::var("USERPROFILE") {
            return Some(PathBuf::from(userprofile));
        }

        dirs::home_dir()
    }

    /// Load configuration from a specific workspace
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        let workspace = workspace.as_ref();

        let config_path = workspace.join(paths::CONFIG_FILE_NAME);
        if config_path.exists() {
            return Self::load_from_file_in(&config_path, workspace);
        }

        let fallback_path = workspace
            .join(paths::HOME_DIR_NAME)
            .join(paths::CONFIG_FILE_NAME);
        if fallback_path.exists() {
            return Self::load_from_file_in(&fallback_path, workspace);
        }

        if let Some(home_dir) = Self::get_home_dir() {
            let home_config_path = home_dir
                .join(paths::HOME_DIR_NAME)
                .join(paths::CONFIG_FILE_NAME);
            if home_config_path.exists() {
                return Self::load_from_file_in(&home_config_path, workspace);
            }
        }

        Ok(Self {
            config: DiagentConfig::default(),
            config_path: None,
            workspace: workspace.to_path_buf(),
        })
    }

    /// Load configuration from a specific file, resolving relative paths against `workspace`
    pub fn load_from_file_in(path: &Path, workspace: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: DiagentConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded configuration");

        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
            workspace: workspace.to_path_buf(),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &DiagentConfig {
        &self.config
    }

    /// Mutable access for command-line overrides
    pub fn config_mut(&mut self) -> &mut DiagentConfig {
        &mut self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Renderer settings with a relative output directory anchored at the workspace
    pub fn renderer_config(&self) -> RendererConfig {
        let mut renderer = self.config.renderer.clone();
        if renderer.output_dir.is_relative() {
            renderer.output_dir = self.workspace.join(&renderer.output_dir);
        }
        renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_file_present() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::load_from_workspace(temp_dir.path()).unwrap();
        // A real ~/.diagent/diagent.toml may exist on the host, so only check the shape.
        assert!(manager.config().validate().is_ok());
        assert_eq!(manager.workspace(), temp_dir.path());
    }

    #[test]
    fn workspace_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(paths::CONFIG_FILE_NAME),
            r#"
[agent]
provider = "anthropic"
model = "claude-3-haiku-20240307"
max_attempts = 5

[renderer]
command = ["plantuml"]
output_dir = "out"
timeout_seconds = 20
"#,
        )
        .unwrap();

        let manager = ConfigManager::load_from_workspace(temp_dir.path()).unwrap();
        let config = manager.config();
        assert_eq!(config.agent.provider, "anthropic");
        assert_eq!(config.agent.max_attempts, 5);
        assert_eq!(config.agent.temperature, 0.5);
        assert_eq!(config.renderer.command, vec!["plantuml".to_string()]);
        assert_eq!(config.renderer.max_attempts, 3);
        assert_eq!(
            manager.renderer_config().output_dir,
            temp_dir.path().join("out")
        );
        assert!(manager.config_path().is_some());
    }

    #[test]
    fn zero_attempts_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(paths::CONFIG_FILE_NAME),
            "[agent]\nmax_attempts = 0\n",
        )
        .unwrap();

        let err = ConfigManager::load_from_workspace(temp_dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("max_attempts"));
    }

    #[test]
    fn empty_renderer_command_rejected() {
        let mut config = DiagentConfig::default();
        config.renderer.command.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn provider_with_no_model_uses_its_default() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(paths::CONFIG_FILE_NAME),
            "[agent]\nprovider = \"anthropic\"\napi_key_env = \"DIAGENT_TEST_KEY\"\n",
        )
        .unwrap();

        let manager = ConfigManager::load_from_workspace(temp_dir.path()).unwrap();
        assert_eq!(
            manager.config().agent.resolved_model().as_deref(),
            Some("claude-3-sonnet-20240229")
        );
    }

    #[test]
    fn provider_model_mismatch_rejected() {
        let mut config = DiagentConfig::default();
        config.agent.provider = "anthropic".to_string();
        config.agent.model = "gpt-4o".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("served by openai"));

        config.agent.model = "claude-3-haiku-20240307".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_provider_rejected() {
        let mut config = DiagentConfig::default();
        config.agent.provider = "gemini".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn sample_config_documents_every_key() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(paths::CONFIG_FILE_NAME);
        DiagentConfig::create_sample_config(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.contains("# Kill a renderer running longer than this; 0 means no timeout\ntimeout_seconds = 0"));
        assert!(content.contains("# Renderer program and leading arguments, one argv entry per string\ncommand = "));
        assert!(content.contains("# Generate-extract-render cycles per request"));
        assert!(content.contains("# Renderer invocations per render"));
        assert!(content.contains("# Model ID; leave empty"));

        let parsed: DiagentConfig = toml::from_str(&content).unwrap();
        assert_eq!(parsed, DiagentConfig::default());
    }

    #[test]
    fn bootstrap_writes_parseable_config_once() {
        let temp_dir = TempDir::new().unwrap();
        let created = DiagentConfig::bootstrap_project(temp_dir.path(), false, false).unwrap();
        let path = created.expect("config should be created");
        let parsed: DiagentConfig = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, DiagentConfig::default());

        let second = DiagentConfig::bootstrap_project(temp_dir.path(), false, false).unwrap();
        assert!(second.is_none());
    }
}
