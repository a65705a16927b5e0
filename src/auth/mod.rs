//! Authentication pipeline
//!
//! Request shaping, credential validation and outcome presentation for login
//! and registration, plus the per-caller session flag.

pub mod credentials;
pub mod interactor;
pub mod presenter;
pub mod registration;
pub mod results;
pub mod session;

pub use credentials::CredentialRecord;
pub use interactor::{LoginInteractor, LoginPresentationLogic};
pub use presenter::{LoginDisplayLogic, LoginPresenter};
pub use registration::RegistrationValidator;
pub use results::{
    LoginRequest, LoginResponse, LoginViewModel, LogoutResult, RegistrationOutcome,
    RegistrationRequest,
};
pub use session::{AuthSession, SessionFlag};
