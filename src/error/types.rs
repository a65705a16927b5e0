//! Error types
//!
//! Defines domain-specific error types for each module of the auth server.

use std::fmt;
use std::io;

/// Message shown for any store-side fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

/// Message shown for unknown users and wrong secrets alike.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Authentication pipeline errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Malformed caller input (empty field, mismatched confirmation).
    Validation(String),
    /// Username already registered.
    Conflict(String),
    /// Unknown user or wrong secret. Deliberately carries no detail.
    InvalidCredentials,
    /// Credential store missing or failing.
    Internal,
}

impl AuthError {
    /// User-facing message for this error.
    pub fn message(&self) -> &str {
        match self {
            AuthError::Validation(msg) => msg,
            AuthError::Conflict(msg) => msg,
            AuthError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE,
            AuthError::Internal => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AuthError {}

/// Credential store errors
#[derive(Debug)]
pub enum StoreError {
    Unavailable(String),
    DuplicateUsername(String),
    Io(io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "Credential store unavailable: {}", msg),
            StoreError::DuplicateUsername(u) => write!(f, "Username already stored: {}", u),
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(error: io::Error) -> Self {
        StoreError::Io(error)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::Serialization(error)
    }
}

/// Store failures never reach the caller in detail; a duplicate insert is
/// the one store error that has a user-facing meaning.
impl From<StoreError> for AuthError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateUsername(_) => AuthError::Conflict("User already exists.".into()),
            _ => AuthError::Internal,
        }
    }
}

/// General server error that encompasses all error types
#[derive(Debug)]
pub enum ServerError {
    Store(StoreError),
    Config(config::ConfigError),
    IoError(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Store(e) => write!(f, "Store error: {}", e),
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ServerError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<StoreError> for ServerError {
    fn from(error: StoreError) -> Self {
        ServerError::Store(error)
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::IoError(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_store_insert_maps_to_conflict() {
        let err = AuthError::from(StoreError::DuplicateUsername("alice".into()));
        assert_eq!(err, AuthError::Conflict("User already exists.".into()));
    }

    #[test]
    fn other_store_failures_map_to_internal() {
        let err = AuthError::from(StoreError::Unavailable("not wired".into()));
        assert_eq!(err, AuthError::Internal);
        assert_eq!(err.to_string(), "Internal error");
    }
}
