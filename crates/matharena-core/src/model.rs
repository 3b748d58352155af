//! Data model exchanged with the MathArena backend.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Numeric identifier of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-issued identifier of a game session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque credential returned by sign-in, kept exactly as issued.
///
/// Note: Debug is masked so the token never lands in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(pub String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Registration form contents.
#[derive(Clone, Default, Serialize)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignUpForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Login form contents.
#[derive(Clone, Default, Serialize)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SignInForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInForm")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub token: AuthToken,
    pub user_id: UserId,
}

/// What the client keeps between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: AuthToken,
    pub user_id: UserId,
    pub username: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Server view of a running game session.
///
/// Returned fresh by every create and answer call; the client never
/// computes any of these fields itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub session_id: SessionId,
    pub expression: String,
    /// Remaining time; on the wire an integer count of nanoseconds.
    #[serde(with = "nanos")]
    pub time_left: Duration,
    #[serde(default)]
    pub score: i64,
}

/// Public profile returned by the user-info endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Integer-nanosecond durations. Negative values mean "out of time" and
/// clamp to zero.
mod nanos {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_nanos()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(Duration::from_nanos(raw.max(0) as u64))
    }
}
