//! In-memory backend and session store for testing pages without a server.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ApiError, StoreError};
use crate::model::{
    AuthToken, GameSnapshot, SessionId, SignInForm, SignUpForm, SignedIn, StoredSession, UserId,
    UserInfo,
};
use crate::traits::{ArenaApi, SessionStore};

/// A call received by `MockArena`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    SignUp { username: String, email: String },
    SignIn { username: String },
    CreateSession { user_id: UserId },
    SubmitAnswer { session_id: SessionId, user_id: UserId, answer: i64 },
    FinishSession { session_id: SessionId, user_id: UserId },
    UserInfo { user_id: UserId },
}

/// A scripted backend.
///
/// Every operation succeeds with a plausible default unless a result was
/// configured for it. Answer results are consumed in order; once the queue
/// is empty the last snapshot is echoed back.
pub struct MockArena {
    sign_up: Mutex<Result<(), ApiError>>,
    sign_in: Mutex<Result<SignedIn, ApiError>>,
    create: Mutex<Result<GameSnapshot, ApiError>>,
    answers: Mutex<VecDeque<Result<GameSnapshot, ApiError>>>,
    finish: Mutex<Result<(), ApiError>>,
    user_info: Mutex<Result<UserInfo, ApiError>>,
    last_snapshot: Mutex<Option<GameSnapshot>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl Default for MockArena {
    fn default() -> Self {
        Self::new()
    }
}

impl MockArena {
    pub fn new() -> Self {
        Self {
            sign_up: Mutex::new(Ok(())),
            sign_in: Mutex::new(Ok(SignedIn {
                token: AuthToken("Bearer mock-token".into()),
                user_id: UserId(1),
            })),
            create: Mutex::new(Ok(snapshot("1", "2+2", 60, 0))),
            answers: Mutex::new(VecDeque::new()),
            finish: Mutex::new(Ok(())),
            user_info: Mutex::new(Ok(UserInfo {
                id: 1,
                username: "mock".into(),
                email: "mock@example.com".into(),
            })),
            last_snapshot: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_sign_up(self, result: Result<(), ApiError>) -> Self {
        *self.sign_up.lock().unwrap() = result;
        self
    }

    pub fn with_sign_in(self, result: Result<SignedIn, ApiError>) -> Self {
        *self.sign_in.lock().unwrap() = result;
        self
    }

    pub fn with_create(self, result: Result<GameSnapshot, ApiError>) -> Self {
        *self.create.lock().unwrap() = result;
        self
    }

    pub fn with_answer(self, result: Result<GameSnapshot, ApiError>) -> Self {
        self.answers.lock().unwrap().push_back(result);
        self
    }

    pub fn with_finish(self, result: Result<(), ApiError>) -> Self {
        *self.finish.lock().unwrap() = result;
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of finish calls so far.
    pub fn finish_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, ApiCall::FinishSession { .. }))
            .count()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Build a snapshot with `secs` seconds left.
pub fn snapshot(session_id: &str, expression: &str, secs: u64, score: i64) -> GameSnapshot {
    GameSnapshot {
        session_id: SessionId(session_id.into()),
        expression: expression.into(),
        time_left: Duration::from_secs(secs),
        score,
    }
}

#[async_trait]
impl ArenaApi for MockArena {
    async fn sign_up(&self, form: &SignUpForm) -> Result<(), ApiError> {
        self.record(ApiCall::SignUp {
            username: form.username.clone(),
            email: form.email.clone(),
        });
        self.sign_up.lock().unwrap().clone()
    }

    async fn sign_in(&self, form: &SignInForm) -> Result<SignedIn, ApiError> {
        self.record(ApiCall::SignIn {
            username: form.username.clone(),
        });
        self.sign_in.lock().unwrap().clone()
    }

    async fn create_session(&self, user_id: UserId) -> Result<GameSnapshot, ApiError> {
        self.record(ApiCall::CreateSession { user_id });
        let result = self.create.lock().unwrap().clone();
        if let Ok(snapshot) = &result {
            *self.last_snapshot.lock().unwrap() = Some(snapshot.clone());
        }
        result
    }

    async fn submit_answer(
        &self,
        session_id: &SessionId,
        user_id: UserId,
        answer: i64,
    ) -> Result<GameSnapshot, ApiError> {
        self.record(ApiCall::SubmitAnswer {
            session_id: session_id.clone(),
            user_id,
            answer,
        });
        let scripted = self.answers.lock().unwrap().pop_front();
        let result = match scripted {
            Some(result) => result,
            None => self
                .last_snapshot
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| ApiError::Rejected {
                    status: 500,
                    message: Some(format!("session {session_id} not found")),
                }),
        };
        if let Ok(snapshot) = &result {
            *self.last_snapshot.lock().unwrap() = Some(snapshot.clone());
        }
        result
    }

    async fn finish_session(
        &self,
        session_id: &SessionId,
        user_id: UserId,
    ) -> Result<(), ApiError> {
        self.record(ApiCall::FinishSession {
            session_id: session_id.clone(),
            user_id,
        });
        self.finish.lock().unwrap().clone()
    }

    async fn user_info(&self, user_id: UserId) -> Result<UserInfo, ApiError> {
        self.record(ApiCall::UserInfo { user_id });
        self.user_info.lock().unwrap().clone()
    }
}

/// Session store that lives in memory.
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<StoredSession>>,
    fail_writes: AtomicBool,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail.
    pub fn failing() -> Self {
        let store = Self::new();
        store.set_failing(true);
        store
    }

    /// Make later writes fail (or succeed again). Reads are unaffected.
    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::Relaxed);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only store",
            )))
        } else {
            Ok(())
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<StoredSession>, StoreError> {
        Ok(self.session.lock().unwrap().clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), StoreError> {
        self.check_writable()?;
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.check_writable()?;
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
