use std::env;

use crate::guard::{
    DEFAULT_LANDING_PATH, DEFAULT_LOGIN_PATH, DEFAULT_PROTECTED_PREFIXES,
    DEFAULT_PUBLIC_ONLY_PATHS, GuardConfig,
};

/// AppConfig
///
/// Holds the application's entire configuration state. It is loaded once at startup,
/// never mutated afterwards, and read by handlers through `AppState::config`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects the auth service and log format.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Base URL of the restaurant REST backend that owns user accounts.
    pub auth_api_url: String,
    // Secret used by the local development token issuer.
    pub jwt_secret: String,
    // Operator account accepted by the local development token issuer.
    pub local_operator_email: String,
    pub local_operator_password: String,
    // Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    // Path classification and redirect targets for the route guard.
    pub guard: GuardConfig,
}

/// Env
///
/// Defines the runtime context: `Local` signs sessions in-process for development,
/// `Production` delegates login to the REST backend.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

const LOCAL_JWT_SECRET: &str = "super-secure-test-secret-value-local";
const LOCAL_AUTH_API_URL: &str = "http://localhost:5000";
const LOCAL_OPERATOR_EMAIL: &str = "admin@restaurant.local";
const LOCAL_OPERATOR_PASSWORD: &str = "password";

impl Default for AppConfig {
    /// default
    ///
    /// A non-panicking configuration for test setup, independent of the process
    /// environment.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:3000".to_string(),
            auth_api_url: LOCAL_AUTH_API_URL.to_string(),
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            local_operator_email: LOCAL_OPERATOR_EMAIL.to_string(),
            local_operator_password: LOCAL_OPERATOR_PASSWORD.to_string(),
            cookie_secure: false,
            guard: GuardConfig::default(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables, failing fast.
    ///
    /// # Panics
    /// Panics if a variable required in production is missing, or if the guard
    /// overrides describe an invalid path classification (overlapping sets, a
    /// protected login page, a public-only landing page).
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let auth_api_url = match env {
            Env::Production => {
                env::var("AUTH_API_URL").expect("FATAL: AUTH_API_URL required in prod")
            }
            Env::Local => {
                env::var("AUTH_API_URL").unwrap_or_else(|_| LOCAL_AUTH_API_URL.to_string())
            }
        };

        let cookie_secure = env_bool("COOKIE_SECURE").unwrap_or(env == Env::Production);

        let guard = GuardConfig::new(
            env_list("GUARD_PROTECTED_PREFIXES")
                .unwrap_or_else(|| DEFAULT_PROTECTED_PREFIXES.map(String::from).to_vec()),
            env_list("GUARD_PUBLIC_ONLY_PATHS")
                .unwrap_or_else(|| DEFAULT_PUBLIC_ONLY_PATHS.map(String::from).to_vec()),
            env::var("GUARD_LOGIN_PATH").unwrap_or_else(|_| DEFAULT_LOGIN_PATH.to_string()),
            env::var("GUARD_LANDING_PATH").unwrap_or_else(|_| DEFAULT_LANDING_PATH.to_string()),
        )
        .unwrap_or_else(|e| panic!("FATAL: invalid route guard configuration: {e}"));

        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            auth_api_url: auth_api_url.trim_end_matches('/').to_string(),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| LOCAL_JWT_SECRET.to_string()),
            local_operator_email: env::var("LOCAL_OPERATOR_EMAIL")
                .unwrap_or_else(|_| LOCAL_OPERATOR_EMAIL.to_string()),
            local_operator_password: env::var("LOCAL_OPERATOR_PASSWORD")
                .unwrap_or_else(|_| LOCAL_OPERATOR_PASSWORD.to_string()),
            cookie_secure,
            guard,
            env,
        }
    }
}

/// Parses the usual spellings of a boolean flag. Unrecognised values count as unset.
pub(crate) fn env_bool(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

/// Splits a comma separated variable, dropping blank items. `None` when unset.
fn env_list(key: &str) -> Option<Vec<String>> {
    env::var(key).ok().map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
}
