//! Registration validator
//!
//! Creates a credential record once the submitted fields are complete, the
//! confirmation matches and the username is free. Nothing is written unless
//! every check passes.

use log::{error, info};

use crate::auth::credentials::CredentialRecord;
use crate::auth::results::RegistrationRequest;
use crate::error::AuthError;
use crate::error::handlers::log_auth_error;
use crate::storage::StoreHandle;

pub struct RegistrationValidator {
    store: StoreHandle,
}

impl RegistrationValidator {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    pub fn register(&self, request: &RegistrationRequest) -> Result<(), AuthError> {
        let result = self.check_and_insert(request);
        if let Err(e) = &result {
            log_auth_error(&request.username, e);
        }
        result
    }

    fn check_and_insert(&self, request: &RegistrationRequest) -> Result<(), AuthError> {
        if request.username.is_empty() || request.secret.is_empty() {
            return Err(AuthError::Validation(
                "Username and password are required.".into(),
            ));
        }

        if request.secret != request.confirm_secret {
            return Err(AuthError::Validation("Passwords do not match.".into()));
        }

        let store = self.store.get().map_err(|e| {
            error!("Registration attempted without a credential store: {}", e);
            AuthError::Internal
        })?;

        if store.find_by_username(&request.username)?.is_some() {
            return Err(AuthError::Conflict("User already exists.".into()));
        }

        // The store rejects duplicates itself, covering a racing registration
        // that slipped in after the lookup above.
        store.insert(CredentialRecord::new(
            request.username.clone(),
            request.secret.clone(),
        ))?;

        info!("Registered user '{}'", request.username);
        Ok(())
    }
}
