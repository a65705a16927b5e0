//! Login presenter
//!
//! Turns interactor responses into view models and forwards them to a
//! display sink.

use crate::auth::interactor::LoginPresentationLogic;
use crate::auth::results::{LoginResponse, LoginViewModel};

/// Receives presented login outcomes.
pub trait LoginDisplayLogic {
    fn display_login(&mut self, view_model: &LoginViewModel);
}

/// Pure mapping from interactor output to presentation output.
pub fn present(response: LoginResponse) -> LoginViewModel {
    LoginViewModel::from(response)
}

pub struct LoginPresenter<'a> {
    display: &'a mut dyn LoginDisplayLogic,
}

impl<'a> LoginPresenter<'a> {
    pub fn new(display: &'a mut dyn LoginDisplayLogic) -> Self {
        Self { display }
    }
}

impl LoginPresentationLogic for LoginPresenter<'_> {
    fn present_login(&mut self, response: LoginResponse) {
        let view_model = present(response);
        self.display.display_login(&view_model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;

    #[derive(Default)]
    struct LastShown(Option<LoginViewModel>);

    impl LoginDisplayLogic for LastShown {
        fn display_login(&mut self, view_model: &LoginViewModel) {
            self.0 = Some(view_model.clone());
        }
    }

    #[test]
    fn forwards_mapped_view_model() {
        let mut display = LastShown::default();
        LoginPresenter::new(&mut display)
            .present_login(LoginResponse::failure(&AuthError::Internal));

        assert_eq!(
            display.0,
            Some(LoginViewModel {
                authenticated: false,
                failure_reason: Some("Internal error".into()),
            })
        );
    }
}
