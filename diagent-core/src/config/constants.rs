/// Model ID constants for the providers diagent can talk to
pub mod models {
    // OpenAI models
    pub mod openai {
        pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";
        pub const SUPPORTED_MODELS: &[&str] = &[
            "gpt-4-turbo-preview",
            "gpt-4-turbo",
            "gpt-4o",
            "gpt-4o-mini",
            "gpt-4.1",
        ];
    }

    // Anthropic models
    pub mod anthropic {
        pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
        pub const SUPPORTED_MODELS: &[&str] = &[
            "claude-3-sonnet-20240229",
            "claude-3-opus-20240229",
            "claude-3-haiku-20240307",
            "claude-3-5-sonnet-20241022",
            "claude-sonnet-4-20250514",
        ];
    }

    /// Model used when the configuration names a provider but no model
    pub fn default_model_for(provider: &str) -> Option<&'static str> {
        match provider.to_lowercase().as_str() {
            super::providers::OPENAI => Some(openai::DEFAULT_MODEL),
            super::providers::ANTHROPIC => Some(anthropic::DEFAULT_MODEL),
            _ => None,
        }
    }

    /// Provider serving `model`, judged by its name prefix
    pub fn provider_for_model(model: &str) -> Option<&'static str> {
        let m = model.to_lowercase();
        if m.starts_with("gpt-") || m.starts_with("o1") || m.starts_with("o3") {
            Some(super::providers::OPENAI)
        } else if m.starts_with("claude-") {
            Some(super::providers::ANTHROPIC)
        } else {
            None
        }
    }
}

/// Provider identifiers used in configuration and the factory
pub mod providers {
    pub const OPENAI: &str = "openai";
    pub const ANTHROPIC: &str = "anthropic";
}

/// API endpoints
pub mod urls {
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
    pub const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
    pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";
}

/// Message role strings used by the provider adapters
pub mod message_roles {
    pub const SYSTEM: &str = "system";
}

/// Default values for configuration
pub mod defaults {
    pub const DEFAULT_PROVIDER: &str = super::providers::OPENAI;
    pub const DEFAULT_TEMPERATURE: f32 = 0.5;
    pub const DEFAULT_MAX_TOKENS: u32 = 4000;
    pub const ANTHROPIC_DEFAULT_MAX_TOKENS: u32 = 4000;
    pub const DEFAULT_GENERATION_ATTEMPTS: usize = 3;
    pub const DEFAULT_RENDER_ATTEMPTS: usize = 3;
    pub const DEFAULT_RENDER_TIMEOUT_SECONDS: u64 = 0;
    pub const DEFAULT_OUTPUT_DIR: &str = "./diagrams";
    pub const DEFAULT_FILE_STEM: &str = "output";
    pub const DEFAULT_PLANTUML_JAR: &str = "./plantuml.jar";
    pub const DEFAULT_JAVA_BIN: &str = "java";
    pub const DEFAULT_LOG_FILTER: &str = "diagent=info,diagent_core=info";
}

/// Files and directories diagent reads or writes
pub mod paths {
    pub const CONFIG_FILE_NAME: &str = "diagent.toml";
    pub const HOME_DIR_NAME: &str = ".diagent";
    pub const MARKUP_EXTENSION: &str = "puml";
    pub const IMAGE_EXTENSION: &str = "png";
    pub const DOWNLOAD_FILE_NAME: &str = "diagram.png";
}

/// Environment variable names
pub mod env {
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
    pub const LOG_FILTER: &str = "RUST_LOG";
}

/// PlantUML command-line flags
pub mod plantuml {
    pub const PIPE_FLAG: &str = "-pipe";
    pub const PNG_FLAG: &str = "-tpng";
    pub const CHARSET_FLAG: &str = "-charset";
    pub const CHARSET: &str = "UTF-8";
    pub const THEME_NAME: &str = "aws-orange";
}
