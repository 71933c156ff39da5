//! Prompt composition for diagram generation

pub mod system;

pub use system::{compose_system_instruction, compose_user_instruction};
