use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use time::Duration;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Lifetime of the session cookie set at login.
pub const SESSION_TTL_DAYS: i64 = 7;

/// token_from_headers
///
/// Reads the session token from the `token` cookie. When the browser sends several
/// `token` pairs, the first one wins. A cookie with an empty value is treated the
/// same as a missing one.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| Cookie::parse(pair.trim().to_owned()).ok())
        .find(|cookie| cookie.name() == TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}

/// session_cookie
///
/// Builds the cookie set after a successful login. Not `HttpOnly`: dashboard page
/// code reads the token and forwards it to the REST backend.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// Builds an already-expired `token` cookie, which makes the browser drop the session.
pub fn expired_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

/// The wall-clock instant a cookie issued at `issued_at` stops being sent.
pub fn expires_at(issued_at: DateTime<Utc>) -> DateTime<Utc> {
    issued_at + chrono::Duration::days(SESSION_TTL_DAYS)
}
