use crate::config::constants::defaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// How the external PlantUML renderer is invoked
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RendererConfig {
    /// Program and leading arguments, e.g. `["java", "-jar", "./plantuml.jar"]`
    #[serde(default = "default_command")]
    pub command: Vec<String>,

    /// Directory that receives the transient `.puml` and `.png` files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File stem shared by the markup and image files
    #[serde(default = "default_file_stem")]
    pub file_stem: String,

    /// Renderer invocations per render call
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Kill the renderer after this many seconds; 0 waits forever
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            output_dir: default_output_dir(),
            file_stem: default_file_stem(),
            max_attempts: default_max_attempts(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl RendererConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }
}

fn default_command() -> Vec<String> {
    vec![
        defaults::DEFAULT_JAVA_BIN.to_string(),
        "-jar".to_string(),
        defaults::DEFAULT_PLANTUML_JAR.to_string(),
    ]
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_OUTPUT_DIR)
}
fn default_file_stem() -> String {
    defaults::DEFAULT_FILE_STEM.to_string()
}
fn default_max_attempts() -> usize {
    defaults::DEFAULT_RENDER_ATTEMPTS
}
fn default_timeout_seconds() -> u64 {
    defaults::DEFAULT_RENDER_TIMEOUT_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_means_unbounded() {
        let config = RendererConfig::default();
        assert_eq!(config.timeout(), None);

        let bounded = RendererConfig {
            timeout_seconds: 30,
            ..RendererConfig::default()
        };
        assert_eq!(bounded.timeout(), Some(Duration::from_secs(30)));
    }
}
