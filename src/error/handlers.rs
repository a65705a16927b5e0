//! Error handlers
//!
//! Logs errors and maps them to control protocol reply codes.

use crate::error::types::{AuthError, ServerError};
use crate::protocol::responses;
use log::{error, warn};

/// Log a server error
pub fn handle_error(err: &ServerError) {
    error!("Auth Server Error: {}", err);
}

/// Convert a pipeline error to a reply code
pub fn error_to_reply_code(err: &AuthError) -> u16 {
    match err {
        AuthError::Validation(_) => responses::SYNTAX_ERROR_IN_ARGUMENTS,
        AuthError::Conflict(_) => responses::NAME_TAKEN,
        AuthError::InvalidCredentials => responses::AUTH_FAILED,
        AuthError::Internal => responses::LOCAL_ERROR,
    }
}

/// Log a pipeline error at the level its category deserves.
pub fn log_auth_error(username: &str, err: &AuthError) {
    match err {
        AuthError::Internal => error!("Credential store fault while handling '{}'", username),
        _ => warn!("Rejected request for '{}': {}", username, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_codes_follow_error_category() {
        assert_eq!(error_to_reply_code(&AuthError::Validation("x".into())), 501);
        assert_eq!(error_to_reply_code(&AuthError::Conflict("x".into())), 550);
        assert_eq!(error_to_reply_code(&AuthError::InvalidCredentials), 530);
        assert_eq!(error_to_reply_code(&AuthError::Internal), 451);
    }
}
