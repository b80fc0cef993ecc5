use async_trait::async_trait;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::{models::ErrorResponse, session::SESSION_TTL_DAYS};

/// AuthError
///
/// Everything that can go wrong while exchanging credentials for a session token.
/// Upstream details are kept for the logs and never returned to the client.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email and password are required")]
    MissingCredentials,
    #[error("request body must be a JSON object with email and password")]
    InvalidBody,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("authentication service unreachable: {0}")]
    Upstream(String),
    #[error("authentication service returned an unusable response: {0}")]
    MalformedResponse(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials | AuthError::InvalidBody => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Upstream(_) | AuthError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match &self {
            AuthError::Upstream(_) | AuthError::MalformedResponse(_) => {
                tracing::error!(error = %self, "login failed upstream");
                "authentication service unavailable".to_string()
            }
            other => other.to_string(),
        };

        (self.status(), Json(ErrorResponse { message })).into_response()
    }
}

/// AuthService Contract
///
/// Exchanges operator credentials for an opaque session token. The gateway never
/// looks inside the token; it only stores it in the `token` cookie.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError>;
}

/// AuthState
///
/// The concrete type used to share the authentication service across the application state.
pub type AuthState = Arc<dyn AuthService>;

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "login body rejected");
        AuthError::InvalidBody
    }
}

// --- HTTP Implementation (REST backend) ---

#[derive(Deserialize)]
struct BackendLoginResponse {
    token: String,
}

/// HttpAuthService
///
/// Forwards the login to the restaurant REST backend (`POST {base}/api/auth/login`)
/// and hands back the token it issues.
#[derive(Clone)]
pub struct HttpAuthService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthService {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let url = format!("{}/api/auth/login", self.base_url);

        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::BAD_REQUEST
        {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::Upstream(format!("backend responded with {status}")));
        }

        let body = response
            .json::<BackendLoginResponse>()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        if body.token.is_empty() {
            return Err(AuthError::MalformedResponse("empty token".to_string()));
        }

        Ok(body.token)
    }
}

// --- Local Implementation (development) ---

/// Claims
///
/// Payload of the tokens signed by `LocalAuthService`. Downstream services may verify
/// them; the route guard does not.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the operator's email.
    pub sub: String,
    /// Unique token id.
    pub jti: Uuid,
    pub iat: usize,
    pub exp: usize,
}

/// LocalAuthService
///
/// Development issuer used in `Env::Local`: accepts a single configured operator
/// account and signs an HS256 JWT that expires together with the session cookie.
pub struct LocalAuthService {
    email: String,
    password: String,
    key: EncodingKey,
}

impl LocalAuthService {
    pub fn new(email: &str, password: &str, secret: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }
}

#[async_trait]
impl AuthService for LocalAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        if !email.eq_ignore_ascii_case(&self.email) || password != self.password {
            return Err(AuthError::InvalidCredentials);
        }

        let now = chrono::Utc::now();
        let claims = Claims {
            sub: self.email.clone(),
            jti: Uuid::new_v4(),
            iat: now.timestamp() as usize,
            exp: (now + chrono::Duration::days(SESSION_TTL_DAYS)).timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.key)
            .map_err(|e| AuthError::Upstream(format!("token signing failed: {e}")))
    }
}

// --- Mock Implementation (tests) ---

/// MockAuthService
///
/// Test double: accepts exactly one credential pair and returns a fixed token, or
/// fails every call with an upstream error when built with `new_failing`.
#[derive(Clone)]
pub struct MockAuthService {
    pub email: String,
    pub password: String,
    pub token: String,
    /// When true, every login returns a simulated upstream failure.
    pub should_fail: bool,
}

impl MockAuthService {
    pub fn new(email: &str, password: &str, token: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            token: token.to_string(),
            should_fail: false,
        }
    }

    pub fn new_failing() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            token: String::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        if self.should_fail {
            return Err(AuthError::Upstream("Mock Auth Error: Simulation requested".to_string()));
        }
        if email == self.email && password == self.password {
            Ok(self.token.clone())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
