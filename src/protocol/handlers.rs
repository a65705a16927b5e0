//! Command handlers
//!
//! Bridges parsed control commands onto a client's [`AuthSession`].

use log::info;

use crate::auth::AuthSession;
use crate::error::handlers::error_to_reply_code;
use crate::protocol::responses::{self, format_response};
use crate::protocol::{Command, CommandResult, CommandStatus};

/// Dispatches a received command to its handler.
pub fn handle_command(session: &mut AuthSession, command: &Command) -> CommandResult {
    match command {
        Command::REGISTER {
            username,
            secret,
            confirm_secret,
        } => handle_cmd_register(session, username, secret, confirm_secret),
        Command::LOGIN { username, secret } => handle_cmd_login(session, username, secret),
        Command::LOGOUT => handle_cmd_logout(session),
        Command::STATUS => handle_cmd_status(session),
        Command::QUIT => handle_cmd_quit(session),
        Command::UNKNOWN => handle_cmd_unknown(),
    }
}

fn success(code: u16, message: &str) -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        message: Some(format_response(code, message)),
    }
}

fn failure(code: u16, message: &str) -> CommandResult {
    CommandResult {
        status: CommandStatus::Failure(message.to_string()),
        message: Some(format_response(code, message)),
    }
}

fn handle_cmd_register(
    session: &mut AuthSession,
    username: &str,
    secret: &str,
    confirm_secret: &str,
) -> CommandResult {
    match session.submit_registration(username, secret, confirm_secret) {
        Ok(()) => success(responses::CREATED, "Registration successful"),
        Err(e) => failure(error_to_reply_code(&e), e.message()),
    }
}

fn handle_cmd_login(session: &mut AuthSession, username: &str, secret: &str) -> CommandResult {
    if session.is_authenticated() {
        return failure(responses::BAD_SEQUENCE, "Already logged in");
    }

    match session.submit_login(username, secret) {
        Ok(()) => success(responses::LOGIN_SUCCESS, "Login successful"),
        Err(e) => failure(error_to_reply_code(&e), e.message()),
    }
}

fn handle_cmd_logout(session: &mut AuthSession) -> CommandResult {
    if session.logout().was_authenticated {
        success(responses::OK, "Logged out")
    } else {
        failure(responses::AUTH_FAILED, "Not logged in")
    }
}

fn handle_cmd_status(session: &AuthSession) -> CommandResult {
    if session.is_authenticated() {
        success(
            responses::STATUS,
            &format!("Authenticated as {}", session.username()),
        )
    } else {
        success(responses::STATUS, "Not authenticated")
    }
}

/// Logs the session out and signals connection close.
fn handle_cmd_quit(session: &mut AuthSession) -> CommandResult {
    let result = session.logout();
    if result.was_authenticated {
        info!("Authenticated client quit");
    }

    CommandResult {
        status: CommandStatus::CloseConnection,
        message: Some(format_response(responses::GOODBYE, "Goodbye")),
    }
}

fn handle_cmd_unknown() -> CommandResult {
    failure(responses::SYNTAX_ERROR, "Unknown command")
}
