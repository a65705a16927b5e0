//! Control protocol implementation
//!
//! Handles command parsing, reply formatting and dispatch onto the auth
//! pipeline.

pub mod commands;
pub mod handlers;
pub mod responses;

pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use handlers::handle_command;
