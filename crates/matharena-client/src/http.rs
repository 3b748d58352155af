//! reqwest implementation of the MathArena backend API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use matharena_core::model::{
    AuthToken, GameSnapshot, SessionId, SignInForm, SignUpForm, SignedIn, UserId, UserInfo,
};
use matharena_core::token::decode_claims;
use matharena_core::{ApiError, ArenaApi};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client for the backend's `/api` routes.
pub struct HttpArenaClient {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpArenaClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ApiError::Network(format!(
                "MathArena backend not reachable at {}",
                self.base_url
            ))
        } else {
            ApiError::Network(e.to_string())
        }
    }

    /// Send a request and turn non-2xx statuses into `ApiError::Rejected`.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .map(|b| b.message);
        warn!(status = status.as_u16(), message = ?message, "backend rejected request");
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(self.client.post(self.url(path)).json(body)).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::InvalidResponse(format!("failed to parse response: {e}")))
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct SignInResponse {
    authorization: String,
    #[serde(default)]
    user_id: Option<i64>,
}

#[derive(Serialize)]
struct CreateSessionRequest {
    user_id: UserId,
}

#[derive(Serialize)]
struct AnswerRequest<'a> {
    session_id: &'a SessionId,
    user_id: UserId,
    answer: i64,
}

#[derive(Serialize)]
struct FinishRequest<'a> {
    session_id: &'a SessionId,
    user_id: UserId,
}

#[async_trait]
impl ArenaApi for HttpArenaClient {
    #[instrument(skip(self, form), fields(username = %form.username))]
    async fn sign_up(&self, form: &SignUpForm) -> Result<(), ApiError> {
        self.send(self.client.post(self.url("/api/signup")).json(form))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, form), fields(username = %form.username))]
    async fn sign_in(&self, form: &SignInForm) -> Result<SignedIn, ApiError> {
        let body: SignInResponse = self.post_json("/api/signin", form).await?;
        let token = AuthToken(body.authorization);

        let user_id = body
            .user_id
            .map(UserId)
            .or_else(|| decode_claims(&token).and_then(|c| c.user_id()))
            .ok_or_else(|| {
                ApiError::InvalidResponse("sign-in response carried no user id".to_string())
            })?;

        Ok(SignedIn { token, user_id })
    }

    #[instrument(skip(self))]
    async fn create_session(&self, user_id: UserId) -> Result<GameSnapshot, ApiError> {
        self.post_json("/api/session/create", &CreateSessionRequest { user_id })
            .await
    }

    #[instrument(skip(self))]
    async fn submit_answer(
        &self,
        session_id: &SessionId,
        user_id: UserId,
        answer: i64,
    ) -> Result<GameSnapshot, ApiError> {
        self.post_json(
            "/api/session/answer",
            &AnswerRequest {
                session_id,
                user_id,
                answer,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    async fn finish_session(
        &self,
        session_id: &SessionId,
        user_id: UserId,
    ) -> Result<(), ApiError> {
        self.send(
            self.client
                .post(self.url("/api/session/finish"))
                .json(&FinishRequest {
                    session_id,
                    user_id,
                }),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn user_info(&self, user_id: UserId) -> Result<UserInfo, ApiError> {
        let response = self
            .send(self.client.get(self.url(&format!("/api/user/{user_id}"))))
            .await?;
        decode(response).await
    }
}
