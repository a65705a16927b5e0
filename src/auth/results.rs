//! Authentication request and result types
//!
//! Login flows through three shapes: the caller's [`LoginRequest`], the
//! interactor's [`LoginResponse`] and the presenter's [`LoginViewModel`].
//! The last two carry the same fields but are kept apart so the interactor's
//! output can change without touching what callers observe.

use serde::Serialize;

use crate::error::AuthError;

/// Credentials asserted by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub secret: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }
}

/// Outcome of a login attempt, produced by the interactor.
///
/// `failure_reason` is present iff `authenticated` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    authenticated: bool,
    failure_reason: Option<String>,
}

impl LoginResponse {
    pub fn success() -> Self {
        Self {
            authenticated: true,
            failure_reason: None,
        }
    }

    pub fn failure(error: &AuthError) -> Self {
        Self {
            authenticated: false,
            failure_reason: Some(error.message().to_string()),
        }
    }

    pub fn from_result(result: &Result<(), AuthError>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(e) => Self::failure(e),
        }
    }

    pub fn authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }
}

/// Login outcome as exposed across the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginViewModel {
    pub authenticated: bool,
    pub failure_reason: Option<String>,
}

impl From<LoginResponse> for LoginViewModel {
    fn from(response: LoginResponse) -> Self {
        Self {
            authenticated: response.authenticated,
            failure_reason: response.failure_reason,
        }
    }
}

/// Fields submitted by a registering caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub username: String,
    pub secret: String,
    pub confirm_secret: String,
}

impl RegistrationRequest {
    pub fn new(
        username: impl Into<String>,
        secret: impl Into<String>,
        confirm_secret: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
            confirm_secret: confirm_secret.into(),
        }
    }
}

/// Outcome of a registration attempt.
///
/// `failure_reason` is present iff `registered` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationOutcome {
    pub registered: bool,
    pub failure_reason: Option<String>,
}

impl From<Result<(), AuthError>> for RegistrationOutcome {
    fn from(result: Result<(), AuthError>) -> Self {
        match result {
            Ok(()) => Self {
                registered: true,
                failure_reason: None,
            },
            Err(e) => Self {
                registered: false,
                failure_reason: Some(e.message().to_string()),
            },
        }
    }
}

/// Result of a logout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutResult {
    pub was_authenticated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_model_copies_response_fields() {
        let vm = LoginViewModel::from(LoginResponse::failure(&AuthError::InvalidCredentials));
        assert_eq!(
            vm,
            LoginViewModel {
                authenticated: false,
                failure_reason: Some("Invalid credentials".into()),
            }
        );

        let vm = LoginViewModel::from(LoginResponse::success());
        assert!(vm.authenticated);
        assert_eq!(vm.failure_reason, None);
    }

    #[test]
    fn view_model_serializes_with_null_reason() {
        let vm = LoginViewModel::from(LoginResponse::success());
        let json = serde_json::to_string(&vm).unwrap();
        assert_eq!(json, r#"{"authenticated":true,"failure_reason":null}"#);
    }

    #[test]
    fn registration_outcome_from_error() {
        let outcome = RegistrationOutcome::from(Err::<(), _>(AuthError::Conflict(
            "User already exists.".into(),
        )));
        assert!(!outcome.registered);
        assert_eq!(outcome.failure_reason.as_deref(), Some("User already exists."));
    }
}
