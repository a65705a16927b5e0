//! Auth session
//!
//! Owns one caller's Session Flag together with the fields of its last login
//! attempt, and wires the interactor, presenter and registration validator
//! onto a shared credential store.

use log::info;

use crate::auth::interactor::LoginInteractor;
use crate::auth::presenter::{LoginDisplayLogic, LoginPresenter, present};
use crate::auth::registration::RegistrationValidator;
use crate::auth::results::{
    LoginRequest, LoginResponse, LoginViewModel, LogoutResult, RegistrationOutcome,
    RegistrationRequest,
};
use crate::error::AuthError;
use crate::storage::StoreHandle;

/// Whether the caller is currently authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionFlag {
    #[default]
    Unauthenticated,
    Authenticated,
}

/// Display-side state updated by the presenter.
#[derive(Debug, Default)]
struct SessionState {
    flag: SessionFlag,
    last_view: Option<LoginViewModel>,
}

impl LoginDisplayLogic for SessionState {
    fn display_login(&mut self, view_model: &LoginViewModel) {
        if view_model.authenticated {
            self.flag = SessionFlag::Authenticated;
        }
        // Only logout demotes the flag; a failure just records why.
        self.last_view = Some(view_model.clone());
    }
}

pub struct AuthSession {
    interactor: LoginInteractor,
    registration: RegistrationValidator,
    username: String,
    secret: String,
    state: SessionState,
}

impl AuthSession {
    pub fn new(store: StoreHandle) -> Self {
        Self {
            interactor: LoginInteractor::new(store.clone()),
            registration: RegistrationValidator::new(store),
            username: String::new(),
            secret: String::new(),
            state: SessionState::default(),
        }
    }

    pub fn register(
        &self,
        username: &str,
        secret: &str,
        confirm_secret: &str,
    ) -> RegistrationOutcome {
        RegistrationOutcome::from(self.submit_registration(username, secret, confirm_secret))
    }

    /// Like [`AuthSession::register`], keeping the typed error.
    pub fn submit_registration(
        &self,
        username: &str,
        secret: &str,
        confirm_secret: &str,
    ) -> Result<(), AuthError> {
        self.registration
            .register(&RegistrationRequest::new(username, secret, confirm_secret))
    }

    /// Caches the submitted fields, runs the login pipeline and returns what
    /// was presented.
    pub fn login(&mut self, username: &str, secret: &str) -> LoginViewModel {
        let result = self.submit_login(username, secret);
        self.state
            .last_view
            .clone()
            .unwrap_or_else(|| present(LoginResponse::from_result(&result)))
    }

    /// Like [`AuthSession::login`], keeping the typed error. The presenter
    /// still runs, so the flag and failure reason are updated either way.
    pub fn submit_login(&mut self, username: &str, secret: &str) -> Result<(), AuthError> {
        self.username = username.to_string();
        self.secret = secret.to_string();

        let request = LoginRequest::new(self.username.clone(), self.secret.clone());
        let mut presenter = LoginPresenter::new(&mut self.state);
        self.interactor.login(&request, &mut presenter)
    }

    /// Resets the flag and clears cached fields and any stored failure.
    pub fn logout(&mut self) -> LogoutResult {
        let was_authenticated = self.is_authenticated();
        if was_authenticated {
            info!("User '{}' logged out", self.username);
        }

        self.username.clear();
        self.secret.clear();
        self.state = SessionState::default();

        LogoutResult { was_authenticated }
    }

    pub fn flag(&self) -> SessionFlag {
        self.state.flag
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.flag == SessionFlag::Authenticated
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.state
            .last_view
            .as_ref()
            .and_then(|vm| vm.failure_reason.as_deref())
    }
}
