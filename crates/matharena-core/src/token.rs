//! Reading the unverified claims of a sign-in token.
//!
//! The backend issues `Bearer <jwt>` tokens whose payload carries the user
//! id. The client only reads the payload to learn who signed in; it never
//! checks the signature or the expiry.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::model::{AuthToken, UserId};

/// Claims the client cares about.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenClaims {
    pub user_id: Option<i64>,
    pub username: Option<String>,
}

impl TokenClaims {
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id.map(UserId)
    }
}

/// Decode the payload segment of a JWT, with or without a `Bearer ` prefix.
///
/// Returns `None` when the token is not a JWT or the payload is not JSON.
pub fn decode_claims(token: &AuthToken) -> Option<TokenClaims> {
    let raw = token.as_str().trim();
    let raw = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();

    let mut segments = raw.split('.');
    let (_header, payload) = (segments.next()?, segments.next()?);
    segments.next()?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}
