//! Command handlers for the diagent binary

mod generate;
mod init;
mod output;
mod render;
mod session;
mod types;

pub use generate::handle_generate_command;
pub use init::handle_init_command;
pub use render::handle_render_command;
pub use session::handle_session_command;
pub use types::handle_types_command;
