//! Control commands
//!
//! Defines the commands accepted on the control connection, their parsed
//! form and the result of executing one.

/// A command parsed from one client line.
///
/// Missing arguments are kept as empty strings so the auth pipeline, not the
/// parser, decides whether the input is acceptable.
#[derive(Debug, PartialEq)]
pub enum Command {
    REGISTER {
        username: String,
        secret: String,
        confirm_secret: String,
    },
    LOGIN {
        username: String,
        secret: String,
    },
    LOGOUT,
    STATUS,
    QUIT,
    UNKNOWN,
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

/// Parses a raw line received from a client into a [`Command`].
///
/// The verb is case-insensitive; arguments are whitespace-separated and
/// passed through untouched.
pub fn parse_command(raw: &str) -> Command {
    let mut parts = raw.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let mut next_arg = || parts.next().unwrap_or("").to_string();

    match cmd.as_str() {
        "REGISTER" | "REG" => Command::REGISTER {
            username: next_arg(),
            secret: next_arg(),
            confirm_secret: next_arg(),
        },
        "LOGIN" => Command::LOGIN {
            username: next_arg(),
            secret: next_arg(),
        },
        "LOGOUT" => Command::LOGOUT,
        "STATUS" => Command::STATUS,
        "QUIT" | "Q" => Command::QUIT,
        _ => Command::UNKNOWN,
    }
}
