pub mod args;

pub use args::{Cli, Commands, OutputArgs, StyleArgs};
