//! diagent configuration
//!
//! Settings come from `diagent.toml` (workspace, `.diagent/`, or `~/.diagent/`);
//! API keys come from the environment.

pub mod api_keys;
pub mod constants;
pub mod core;
pub mod loader;

pub use core::{AgentConfig, RendererConfig};
pub use loader::{ConfigManager, DiagentConfig};
