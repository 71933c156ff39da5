//! LLM error display utilities
//!
//! Provider errors are surfaced to the terminal verbatim, so they are styled
//! with the provider name up front.

use console::style;

/// Get a styled error message
pub fn style_llm_error(message: &str) -> String {
    style(message).red().to_string()
}

/// Get a styled provider name, colored per provider
pub fn style_provider_name(provider: &str) -> String {
    let styled_name = match provider.to_lowercase().as_str() {
        "openai" => style(provider).yellow(),
        "anthropic" => style(provider).magenta(),
        _ => style(provider).cyan(),
    };
    styled_name.to_string()
}

/// Format an LLM error for display
pub fn format_llm_error(provider: &str, error: &str) -> String {
    format!(
        "{} {}",
        style_provider_name(provider),
        style_llm_error(error)
    )
}
