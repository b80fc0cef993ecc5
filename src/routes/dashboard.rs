use crate::{AppState, handlers, pages};
use axum::{Router, routing::get};

/// Dashboard Router Module
///
/// One page shell per back-office page, plus a catch-all under `/dashboard` for its
/// sub-views. Which of these need a session is decided by the guard's protected
/// prefixes, not by this table.
pub fn dashboard_routes() -> Router<AppState> {
    let router = pages::DASHBOARD_PAGES.iter().fold(Router::new(), |router, spec| {
        router.route(spec.path, get(handlers::page(spec)))
    });

    match pages::find("dashboard") {
        // GET /dashboard/{*rest}
        Some(spec) => router.route("/dashboard/{*rest}", get(handlers::page(spec))),
        None => router,
    }
}
