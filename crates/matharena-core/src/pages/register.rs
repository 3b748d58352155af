//! Registration page.

use std::time::Duration;

use tracing::{info, warn};

use crate::model::SignUpForm;
use crate::pages::{inline_message, FormStatus};
use crate::router::{Navigation, Route};
use crate::traits::ArenaApi;
use crate::validation::validate_sign_up;

/// Pause between a successful registration and the login page.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);
pub const SUCCESS_MESSAGE: &str = "Account created successfully! You can now log in.";
pub const LOADING_MESSAGE: &str = "Creating account...";
const FALLBACK_ERROR: &str = "Something went wrong";

#[derive(Debug, Default)]
pub struct RegisterPage {
    status: FormStatus,
    error: Option<String>,
}

impl RegisterPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success_message(&self) -> Option<&'static str> {
        (self.status == FormStatus::Succeeded).then_some(SUCCESS_MESSAGE)
    }

    /// Validate and submit the form.
    ///
    /// Invalid input never reaches the backend. On success the page asks to
    /// move to login after `REDIRECT_DELAY`.
    pub async fn submit(&mut self, api: &dyn ArenaApi, form: &SignUpForm) -> Option<Navigation> {
        self.error = None;
        self.status = FormStatus::Submitting;

        if let Err(err) = validate_sign_up(form) {
            self.error = Some(err.to_string());
            self.status = FormStatus::Idle;
            return None;
        }

        match api.sign_up(form).await {
            Ok(()) => {
                info!(username = %form.username, "registration succeeded");
                self.status = FormStatus::Succeeded;
                Some(Navigation::delayed(Route::Login, REDIRECT_DELAY))
            }
            Err(err) => {
                warn!(error = %err, "registration failed");
                self.error = Some(inline_message(&err, FALLBACK_ERROR));
                self.status = FormStatus::Idle;
                None
            }
        }
    }

    /// "Already have an account?"
    pub fn go_to_login(&self) -> Navigation {
        Navigation::to(Route::Login)
    }
}
