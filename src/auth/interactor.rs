//! Login interactor
//!
//! Looks the asserted username up in the credential store, compares secrets
//! and hands the resulting [`LoginResponse`] to its presentation output.

use log::{debug, error, info};

use crate::auth::results::{LoginRequest, LoginResponse};
use crate::error::AuthError;
use crate::error::handlers::log_auth_error;
use crate::storage::StoreHandle;

/// Output port the interactor reports to.
pub trait LoginPresentationLogic {
    fn present_login(&mut self, response: LoginResponse);
}

pub struct LoginInteractor {
    store: StoreHandle,
}

impl LoginInteractor {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Validates `request` and delivers the response to `presenter`.
    ///
    /// The typed outcome is returned as well, after presentation.
    pub fn login(
        &self,
        request: &LoginRequest,
        presenter: &mut dyn LoginPresentationLogic,
    ) -> Result<(), AuthError> {
        let result = self.authenticate(request);
        match &result {
            Ok(()) => info!("User '{}' authenticated", request.username),
            Err(e) => log_auth_error(&request.username, e),
        }
        presenter.present_login(LoginResponse::from_result(&result));
        result
    }

    /// Checks the request against the store.
    ///
    /// Unknown usernames and wrong secrets both yield
    /// [`AuthError::InvalidCredentials`]. Lookup is exact and case-sensitive.
    pub fn authenticate(&self, request: &LoginRequest) -> Result<(), AuthError> {
        let store = self.store.get().map_err(|e| {
            error!("Login attempted without a credential store: {}", e);
            AuthError::Internal
        })?;

        let record = store.find_by_username(&request.username).map_err(|e| {
            error!("Credential lookup failed: {}", e);
            AuthError::Internal
        })?;

        match record {
            Some(record) if record.matches_secret(&request.secret) => Ok(()),
            Some(_) => {
                debug!("Secret mismatch for '{}'", request.username);
                Err(AuthError::InvalidCredentials)
            }
            None => {
                debug!("No record for '{}'", request.username);
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::CredentialRecord;
    use crate::error::StoreError;
    use crate::storage::{CredentialStore, InMemoryCredentialStore};
    use std::sync::Arc;

    /// A wired-up store whose every operation fails.
    struct FailingStore;

    impl CredentialStore for FailingStore {
        fn insert(&self, _record: CredentialRecord) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disk gone".into()))
        }

        fn find_by_username(&self, _username: &str) -> Result<Option<CredentialRecord>, StoreError> {
            Err(StoreError::Unavailable("disk gone".into()))
        }

        fn len(&self) -> Result<usize, StoreError> {
            Err(StoreError::Unavailable("disk gone".into()))
        }
    }

    /// Records every response it is handed.
    #[derive(Default)]
    struct RecordingPresenter {
        responses: Vec<LoginResponse>,
    }

    impl LoginPresentationLogic for RecordingPresenter {
        fn present_login(&mut self, response: LoginResponse) {
            self.responses.push(response);
        }
    }

    fn interactor_with(records: &[(&str, &str)]) -> LoginInteractor {
        let store = InMemoryCredentialStore::with_records(
            records.iter().map(|(u, s)| CredentialRecord::new(*u, *s)),
        )
        .unwrap();
        LoginInteractor::new(StoreHandle::new(Arc::new(store)))
    }

    #[test]
    fn matching_credentials_authenticate() {
        let interactor = interactor_with(&[("testuser", "password123")]);
        let mut presenter = RecordingPresenter::default();

        let result =
            interactor.login(&LoginRequest::new("testuser", "password123"), &mut presenter);

        assert_eq!(result, Ok(()));
        assert_eq!(presenter.responses, vec![LoginResponse::success()]);
    }

    #[test]
    fn wrong_secret_and_unknown_user_are_indistinguishable() {
        let interactor = interactor_with(&[("testuser", "password123")]);
        let mut presenter = RecordingPresenter::default();

        let wrong_secret =
            interactor.login(&LoginRequest::new("testuser", "wrongpassword"), &mut presenter);
        let unknown_user =
            interactor.login(&LoginRequest::new("nonexistent", "password123"), &mut presenter);

        assert_eq!(wrong_secret, Err(AuthError::InvalidCredentials));
        assert_eq!(unknown_user, wrong_secret);

        assert_eq!(presenter.responses.len(), 2);
        assert_eq!(presenter.responses[0], presenter.responses[1]);
        assert_eq!(
            presenter.responses[0].failure_reason(),
            Some("Invalid credentials")
        );
    }

    #[test]
    fn username_lookup_is_case_sensitive() {
        let interactor = interactor_with(&[("alice", "secret1")]);
        assert_eq!(
            interactor.authenticate(&LoginRequest::new("Alice", "secret1")),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            interactor.authenticate(&LoginRequest::new(" alice", "secret1")),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn missing_store_is_an_internal_error() {
        let interactor = LoginInteractor::new(StoreHandle::Uninitialized);
        let mut presenter = RecordingPresenter::default();

        let result = interactor.login(&LoginRequest::new("test", "password"), &mut presenter);

        assert_eq!(result, Err(AuthError::Internal));
        let response = &presenter.responses[0];
        assert!(!response.authenticated());
        assert_eq!(response.failure_reason(), Some("Internal error"));
    }

    #[test]
    fn failing_lookup_is_an_internal_error() {
        let interactor = LoginInteractor::new(StoreHandle::new(Arc::new(FailingStore)));
        let mut presenter = RecordingPresenter::default();

        let result = interactor.login(&LoginRequest::new("alice", "secret1"), &mut presenter);

        assert_eq!(result, Err(AuthError::Internal));
        assert_eq!(
            presenter.responses,
            vec![LoginResponse::failure(&AuthError::Internal)]
        );
        assert_eq!(presenter.responses[0].failure_reason(), Some("Internal error"));
    }

    #[test]
    fn lookup_among_many_records() {
        let records: Vec<(String, String)> = (0..100)
            .map(|i| (format!("user{i}"), format!("password{i}")))
            .collect();
        let refs: Vec<(&str, &str)> = records
            .iter()
            .map(|(u, s)| (u.as_str(), s.as_str()))
            .collect();
        let interactor = interactor_with(&refs);

        assert!(interactor.authenticate(&LoginRequest::new("user99", "password99")).is_ok());
        assert!(interactor.authenticate(&LoginRequest::new("user99", "password98")).is_err());
    }
}
