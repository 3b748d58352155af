//! The signed-in session, passed explicitly to every page.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::error::StoreError;
use crate::model::{SignedIn, StoredSession, UserId};
use crate::traits::SessionStore;

/// Login state shared by the pages.
///
/// Wraps a `SessionStore` and caches what it holds. Being logged in means
/// a token is present; nothing else is checked.
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current: Option<StoredSession>,
}

impl SessionContext {
    /// Load whatever the store currently holds.
    pub fn load(store: Arc<dyn SessionStore>) -> Result<Self, StoreError> {
        let current = store.load()?;
        Ok(Self { store, current })
    }

    pub fn is_logged_in(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|s| !s.token.as_str().is_empty())
    }

    pub fn current(&self) -> Option<&StoredSession> {
        self.current.as_ref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.current.as_ref().map(|s| s.user_id)
    }

    /// Persist a fresh sign-in. The cache is only updated once the store
    /// accepted it.
    pub fn sign_in(&mut self, signed_in: SignedIn, username: &str) -> Result<(), StoreError> {
        let session = StoredSession {
            token: signed_in.token,
            user_id: signed_in.user_id,
            username: username.to_string(),
            signed_in_at: Utc::now(),
        };
        self.store.save(&session)?;
        debug!(user_id = %session.user_id, "session stored");
        self.current = Some(session);
        Ok(())
    }

    /// Forget the session. The cache is only dropped once the store is
    /// cleared.
    pub fn sign_out(&mut self) -> Result<(), StoreError> {
        self.store.clear()?;
        self.current = None;
        Ok(())
    }
}
