//! Traits implemented by the HTTP client and the session storage backends.

use async_trait::async_trait;

use crate::error::{ApiError, StoreError};
use crate::model::{
    GameSnapshot, SessionId, SignInForm, SignUpForm, SignedIn, StoredSession, UserId, UserInfo,
};

// ---------------------------------------------------------------------------
// Backend API
// ---------------------------------------------------------------------------

/// The MathArena backend as seen by the pages.
///
/// Implementations make exactly one request per call. Failures come back as
/// `ApiError`; there is no retry.
#[async_trait]
pub trait ArenaApi: Send + Sync {
    /// Register a new account.
    async fn sign_up(&self, form: &SignUpForm) -> Result<(), ApiError>;

    /// Exchange credentials for a token.
    async fn sign_in(&self, form: &SignInForm) -> Result<SignedIn, ApiError>;

    /// Start a timed game session for `user_id`.
    async fn create_session(&self, user_id: UserId) -> Result<GameSnapshot, ApiError>;

    /// Submit an answer to the current expression.
    async fn submit_answer(
        &self,
        session_id: &SessionId,
        user_id: UserId,
        answer: i64,
    ) -> Result<GameSnapshot, ApiError>;

    /// Close a game session.
    async fn finish_session(&self, session_id: &SessionId, user_id: UserId)
        -> Result<(), ApiError>;

    /// Fetch the public profile of a user.
    async fn user_info(&self, user_id: UserId) -> Result<UserInfo, ApiError>;
}

// ---------------------------------------------------------------------------
// Session storage
// ---------------------------------------------------------------------------

/// Durable home of the signed-in session.
pub trait SessionStore: Send + Sync {
    /// Read the stored session, if there is one.
    fn load(&self) -> Result<Option<StoredSession>, StoreError>;

    /// Replace the stored session.
    fn save(&self, session: &StoredSession) -> Result<(), StoreError>;

    /// Delete the stored session. Deleting nothing is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}
