//! Login page.

use std::time::Duration;

use tracing::{info, warn};

use crate::model::SignInForm;
use crate::pages::{inline_message, FormStatus};
use crate::router::{Navigation, Route};
use crate::session::SessionContext;
use crate::traits::ArenaApi;
use crate::validation::validate_sign_in;

/// Pause between a successful login and the home page.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(1);
pub const LOADING_MESSAGE: &str = "Logging in...";
const FALLBACK_ERROR: &str = "Invalid username or password";
const STORE_ERROR: &str = "Unable to save session";

#[derive(Debug, Default)]
pub struct LoginPage {
    status: FormStatus,
    error: Option<String>,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sign in and store the session.
    ///
    /// The session is persisted before the redirect is returned, so the
    /// home page always finds it.
    pub async fn submit(
        &mut self,
        api: &dyn ArenaApi,
        ctx: &mut SessionContext,
        form: &SignInForm,
    ) -> Option<Navigation> {
        self.error = None;
        self.status = FormStatus::Submitting;

        if let Err(err) = validate_sign_in(form) {
            self.error = Some(err.to_string());
            self.status = FormStatus::Idle;
            return None;
        }

        let signed_in = match api.sign_in(form).await {
            Ok(signed_in) => signed_in,
            Err(err) => {
                warn!(error = %err, "login failed");
                self.error = Some(inline_message(&err, FALLBACK_ERROR));
                self.status = FormStatus::Idle;
                return None;
            }
        };

        let user_id = signed_in.user_id;
        if let Err(err) = ctx.sign_in(signed_in, &form.username) {
            warn!(error = %err, "unable to persist session");
            self.error = Some(STORE_ERROR.to_string());
            self.status = FormStatus::Idle;
            return None;
        }

        info!(%user_id, "login succeeded");
        self.status = FormStatus::Succeeded;
        Some(Navigation::delayed(Route::Home, REDIRECT_DELAY))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::ApiError;
    use crate::mock::{MemorySessionStore, MockArena};
    use crate::model::{AuthToken, SignedIn, UserId};
    use crate::traits::SessionStore;

    fn form() -> SignInForm {
        SignInForm {
            username: "aboba".into(),
            password: "Aboba20!8".into(),
        }
    }

    #[tokio::test]
    async fn success_persists_token_before_redirect() {
        let api = MockArena::new().with_sign_in(Ok(SignedIn {
            token: AuthToken("Bearer jwt".into()),
            user_id: UserId(4),
        }));
        let store = Arc::new(MemorySessionStore::new());
        let mut ctx = SessionContext::load(store.clone()).unwrap();
        let mut page = LoginPage::new();

        let nav = page.submit(&api, &mut ctx, &form()).await;

        assert_eq!(nav, Some(Navigation::delayed(Route::Home, REDIRECT_DELAY)));
        let stored = store.load().unwrap().expect("session stored");
        assert_eq!(stored.token, AuthToken("Bearer jwt".into()));
        assert_eq!(stored.user_id, UserId(4));
        assert_eq!(stored.username, "aboba");
        assert!(ctx.is_logged_in());
        assert_eq!(page.status(), FormStatus::Succeeded);
    }

    #[tokio::test]
    async fn unauthorized_shows_server_message() {
        let api = MockArena::new().with_sign_in(Err(ApiError::Rejected {
            status: 401,
            message: Some("invalid credentials".into()),
        }));
        let store = Arc::new(MemorySessionStore::new());
        let mut ctx = SessionContext::load(store.clone()).unwrap();
        let mut page = LoginPage::new();

        assert_eq!(page.submit(&api, &mut ctx, &form()).await, None);
        assert_eq!(page.error(), Some("invalid credentials"));
        assert!(!ctx.is_logged_in());
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn unreachable_backend_shows_fallback() {
        let api = MockArena::new().with_sign_in(Err(ApiError::Timeout(10)));
        let mut ctx = SessionContext::load(Arc::new(MemorySessionStore::new())).unwrap();
        let mut page = LoginPage::new();

        page.submit(&api, &mut ctx, &form()).await;
        assert_eq!(page.error(), Some("Invalid username or password"));
        assert_eq!(page.status(), FormStatus::Idle);
    }

    #[tokio::test]
    async fn store_failure_blocks_navigation() {
        let api = MockArena::new();
        let mut ctx = SessionContext::load(Arc::new(MemorySessionStore::failing())).unwrap();
        let mut page = LoginPage::new();

        assert_eq!(page.submit(&api, &mut ctx, &form()).await, None);
        assert_eq!(page.error(), Some("Unable to save session"));
        assert!(!ctx.is_logged_in());
    }

    #[tokio::test]
    async fn blank_password_is_not_sent() {
        let api = MockArena::new();
        let mut ctx = SessionContext::load(Arc::new(MemorySessionStore::new())).unwrap();
        let mut page = LoginPage::new();
        let mut blank = form();
        blank.password = " ".into();

        page.submit(&api, &mut ctx, &blank).await;
        assert_eq!(page.error(), Some("Password is required"));
        assert_eq!(api.call_count(), 0);
    }
}
