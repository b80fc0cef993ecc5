use backoffice_portal::{
    AppState,
    auth::{AuthState, HttpAuthService, LocalAuthService},
    config::{AppConfig, Env},
    create_router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point: loads configuration, initialises logging, picks the authentication
/// service for the environment, and serves the router.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "backoffice_portal=debug,tower_http=info,axum=trace".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);
    tracing::info!(
        protected = ?config.guard.protected_prefixes(),
        public_only = ?config.guard.public_only_paths(),
        login = %config.guard.login_path(),
        landing = %config.guard.landing_path(),
        "route guard configured"
    );

    // 3. Authentication service
    let auth = match config.env {
        Env::Local => {
            tracing::warn!(
                operator = %config.local_operator_email,
                "using the local development token issuer"
            );
            Arc::new(LocalAuthService::new(
                &config.local_operator_email,
                &config.local_operator_password,
                &config.jwt_secret,
            )) as AuthState
        }
        Env::Production => Arc::new(HttpAuthService::new(&config.auth_api_url)) as AuthState,
    };

    // 4. Router and server
    let bind_addr = config.bind_addr.clone();
    let app = create_router(AppState::new(config, auth));

    let listener = TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("FATAL: failed to bind {bind_addr}: {e}"));

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at: http://{}/swagger-ui", bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server terminated");
    }
}
