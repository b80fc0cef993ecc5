use crate::{AppState, handlers, pages};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable without a session. The `/api/auth/*` routes sit outside the
/// guard's path sets, so the guard never redirects them. The entry pages are
/// public-only: a client that already holds a `token` cookie is sent on to the
/// landing page instead.
pub fn public_routes() -> Router<AppState> {
    let router = Router::new()
        // GET /health
        // Liveness probe for load balancers.
        .route("/health", get(|| async { "ok" }))
        // POST /api/auth/login
        // Exchanges credentials for a session token and sets the `token` cookie.
        .route("/api/auth/login", post(handlers::login))
        // POST /api/auth/logout
        // Expires the `token` cookie.
        .route("/api/auth/logout", post(handlers::logout));

    // GET /login, GET /register
    pages::ENTRY_PAGES.iter().fold(router, |router, spec| {
        router.route(spec.path, get(handlers::page(spec)))
    })
}
