//! Page state machines.
//!
//! Each page owns its local state and error message. Operations take the
//! backend (and the session context where needed) as arguments, catch every
//! failure, and hand back an optional `Navigation` for the front end.

pub mod home;
pub mod login;
pub mod register;

pub use home::{GameCard, HomePage, HomeView};
pub use login::LoginPage;
pub use register::RegisterPage;

use crate::error::ApiError;

/// Progress of an auth form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

/// Inline text for a failed auth request: the server's own message when it
/// sent one, otherwise `fallback`.
pub(crate) fn inline_message(err: &ApiError, fallback: &str) -> String {
    err.server_message()
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_server_message() {
        let err = ApiError::Rejected {
            status: 401,
            message: Some("invalid credentials".into()),
        };
        assert_eq!(inline_message(&err, "fallback"), "invalid credentials");
        assert_eq!(
            inline_message(&ApiError::Timeout(10), "fallback"),
            "fallback"
        );
    }
}
