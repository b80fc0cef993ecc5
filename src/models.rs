use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Authentication Schemas ---

/// LoginRequest
///
/// Input payload for the login endpoint (POST /api/auth/login).
/// The password is only forwarded to the authentication service and never logged.
/// Absent fields deserialize as empty and are rejected by the handler as missing.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct LoginRequest {
    #[schema(example = "manager@restaurant.test")]
    pub email: String,
    pub password: String,
}

/// LoginResponse
///
/// Returned after a successful login. The same token is also set as the `token`
/// cookie; page code keeps this copy in client-side storage.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginResponse {
    pub token: String,
    /// When the session cookie stops being sent by the browser.
    #[ts(type = "string")]
    pub expires_at: DateTime<Utc>,
}

/// ErrorResponse
///
/// Body of every JSON error. The dashboard shows `message` in its error toast.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ErrorResponse {
    pub message: String,
}

// --- Page Shells ---

/// PageDescriptor
///
/// What a dashboard page shell returns: the page identity and the REST data
/// endpoints its client code fetches once it is allowed through the guard.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq, Eq)]
#[ts(export)]
pub struct PageDescriptor {
    pub name: String,
    pub title: String,
    pub data_endpoints: Vec<String>,
}
