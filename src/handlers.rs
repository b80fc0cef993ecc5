use crate::{
    AppState,
    auth::AuthError,
    models::{ErrorResponse, LoginRequest, LoginResponse, PageDescriptor},
    pages::PageSpec,
    session,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;

// --- Handlers ---

/// login
///
/// [Public Route] Exchanges operator credentials for a session token.
///
/// *Flow*: forwards the credentials to the configured `AuthService`, then sets the
/// `token` cookie (7-day lifetime) and returns the same token in the body for the
/// client-side store. Failures map to `AuthError` responses with a JSON `message`.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Missing credentials or malformed body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 502, description = "Authentication service unavailable", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), AuthError> {
    let Json(payload) = payload?;
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let token = state.auth.login(email, &payload.password).await?;
    let issued_at = chrono::Utc::now();

    tracing::info!(email = %email, "operator logged in");

    let jar = jar.add(session::session_cookie(
        token.clone(),
        state.config.cookie_secure,
    ));

    Ok((
        jar,
        Json(LoginResponse {
            token,
            expires_at: session::expires_at(issued_at),
        }),
    ))
}

/// logout
///
/// [Public Route] Ends the browser session by replacing the `token` cookie with an
/// expired one. The token itself is not revoked anywhere.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 204, description = "Session cookie cleared"))
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(session::expired_cookie(state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

/// page
///
/// Builds the handler for a page shell. It only runs once the route guard has let
/// the request through.
pub fn page(
    spec: &'static PageSpec,
) -> impl Fn() -> std::future::Ready<Json<PageDescriptor>> + Clone + Send + Sync + 'static {
    move || std::future::ready(Json(spec.descriptor()))
}
