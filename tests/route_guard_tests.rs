use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request, StatusCode, header},
    response::Response,
};
use backoffice_portal::{
    AppConfig, AppState, GuardConfig, MockAuthService, create_router, models::PageDescriptor,
    session,
};
use std::sync::Arc;
use tower::util::ServiceExt;

// --- Helpers ---

fn app_with(config: AppConfig) -> axum::Router {
    let auth = Arc::new(MockAuthService::new("manager@restaurant.test", "secret", "abc123"));
    create_router(AppState::new(config, auth))
}

fn app() -> axum::Router {
    app_with(AppConfig::default())
}

async fn get(app: axum::Router, uri: &str, token: Option<&str>) -> Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("theme=dark; token={token}"));
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

async fn page(response: Response) -> PageDescriptor {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

// --- Tests ---

#[tokio::test]
async fn test_dashboard_without_session_redirects_to_login() {
    let response = get(app(), "/dashboard", None).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_dashboard_subview_with_session_reaches_page() {
    let response = get(app(), "/dashboard/tables", Some("abc123")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let descriptor = page(response).await;
    assert_eq!(descriptor.name, "dashboard");
}

#[tokio::test]
async fn test_login_page_with_session_redirects_to_dashboard() {
    let response = get(app(), "/login", Some("abc123")).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_login_page_without_session_is_served() {
    let response = get(app(), "/login", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(page(response).await.name, "login");
}

#[tokio::test]
async fn test_unclassified_path_is_never_redirected() {
    let response = get(app(), "/about", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app(), "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_pages_outside_protected_prefixes_pass_without_session() {
    let response = get(app(), "/reports", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let descriptor = page(response).await;
    assert_eq!(
        descriptor.data_endpoints,
        vec!["/api/stock/report".to_string(), "/api/stock/history".to_string()]
    );
}

#[tokio::test]
async fn test_protected_path_without_page_still_redirects() {
    let response = get(app(), "/settings/profile", None).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_empty_cookie_is_treated_as_no_session() {
    let response = get(app(), "/data", Some("")).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_tables_page_lists_its_endpoint() {
    let response = get(app(), "/data", Some("abc123")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let descriptor = page(response).await;
    assert_eq!(descriptor.name, "tables");
    assert_eq!(descriptor.data_endpoints, vec!["/api/tables".to_string()]);
}

#[tokio::test]
async fn test_custom_guard_configuration_is_honoured() {
    let config = AppConfig {
        guard: GuardConfig::new(
            ["/dashboard", "/products"],
            ["/login"],
            "/login",
            "/products",
        )
        .unwrap(),
        ..AppConfig::default()
    };

    let response = get(app_with(config.clone()), "/products", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");

    let response = get(app_with(config.clone()), "/login", Some("abc123")).await;
    assert_eq!(location(&response), "/products");

    // No longer public-only, so a session does not bounce it.
    let response = get(app_with(config), "/register", Some("abc123")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let response = get(app(), "/dashboard", None).await;

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_first_token_cookie_wins() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/dashboard")
                .header(header::COOKIE, "token=; token=abc123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
}

#[test]
fn test_token_from_headers_reads_first_pair_across_headers() {
    let mut headers = HeaderMap::new();
    headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
    headers.append(header::COOKIE, HeaderValue::from_static("token=first; token=second"));

    assert_eq!(session::token_from_headers(&headers).as_deref(), Some("first"));

    let mut headers = HeaderMap::new();
    headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
    assert_eq!(session::token_from_headers(&headers), None);
}
