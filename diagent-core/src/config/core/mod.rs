pub mod agent;
pub mod renderer;

pub use agent::AgentConfig;
pub use renderer::RendererConfig;
