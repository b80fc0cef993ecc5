use axum::{Router, http::HeaderName, middleware};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod session;

// Routing tables (public entry points, dashboard page shells).
pub mod routes;
use routes::{dashboard, public};

// --- Public Re-exports ---

pub use auth::{AuthService, AuthState, HttpAuthService, LocalAuthService, MockAuthService};
pub use config::AppConfig;
pub use guard::{GuardConfig, GuardState, Outcome};

/// ApiDoc
///
/// Auto-generated OpenAPI document for the JSON endpoints, served at
/// `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::login, handlers::logout),
    components(
        schemas(
            models::LoginRequest, models::LoginResponse, models::ErrorResponse,
            models::PageDescriptor,
        )
    ),
    tags(
        (name = "backoffice-portal", description = "Restaurant back-office portal gateway")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, immutable container shared by every request: the authentication
/// service, the route guard configuration, and the loaded application config.
#[derive(Clone)]
pub struct AppState {
    /// Exchanges credentials for session tokens.
    pub auth: AuthState,
    /// Read-only path classification used by the `route_guard` middleware.
    pub guard: GuardState,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Assembles the state, sharing the guard section of `config` behind an `Arc`.
    pub fn new(config: AppConfig, auth: AuthState) -> Self {
        Self {
            auth,
            guard: Arc::new(config.guard.clone()),
            config,
        }
    }
}

/// create_router
///
/// Assembles the routing table, wraps it in the route guard, and adds the
/// observability and CORS layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(dashboard::dashboard_routes())
        // The guard wraps every route and the fallback, so protected paths with no
        // page behind them still redirect instead of answering 404.
        .layer(middleware::from_fn_with_state(
            state.guard.clone(),
            guard::route_guard,
        ))
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Opens the per-request span, tagged with the `x-request-id` set by
/// `SetRequestIdLayer` so every log line of a request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
