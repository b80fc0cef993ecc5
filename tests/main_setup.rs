use backoffice_portal::{AppConfig, GuardConfig, config::Env};
use serial_test::serial;
use std::{env, panic};

// --- Setup/Teardown Utilities ---

const ALL_VARS: [&str; 11] = [
    "APP_ENV",
    "AUTH_API_URL",
    "BIND_ADDR",
    "JWT_SECRET",
    "LOCAL_OPERATOR_EMAIL",
    "LOCAL_OPERATOR_PASSWORD",
    "COOKIE_SECURE",
    "GUARD_PROTECTED_PREFIXES",
    "GUARD_PUBLIC_ONLY_PATHS",
    "GUARD_LOGIN_PATH",
    "GUARD_LANDING_PATH",
];

/// Runs `test` with exactly `vars` set (every other config variable cleared) and
/// restores the original environment afterwards, even if the test panics.
fn run_with_env<T, R>(vars: &[(&str, &str)], test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(&str, Option<String>)> =
        ALL_VARS.iter().map(|&var| (var, env::var(var).ok())).collect();

    unsafe {
        for var in ALL_VARS {
            env::remove_var(var);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }

    let result = panic::catch_unwind(test);

    unsafe {
        for (key, original_value) in originals {
            match original_value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(&[("APP_ENV", "local")], AppConfig::load);

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.bind_addr, "0.0.0.0:3000");
    assert_eq!(config.auth_api_url, "http://localhost:5000");
    assert_eq!(config.jwt_secret, "super-secure-test-secret-value-local");
    assert!(!config.cookie_secure);
    assert_eq!(config.guard, GuardConfig::default());
}

#[test]
#[serial]
fn test_app_config_production_requires_auth_api_url() {
    let result = run_with_env(&[("APP_ENV", "production")], || {
        panic::catch_unwind(AppConfig::load)
    });

    assert!(
        result.is_err(),
        "Production config loading should panic without AUTH_API_URL"
    );
}

#[test]
#[serial]
fn test_app_config_production_secure_cookie_by_default() {
    let config = run_with_env(
        &[
            ("APP_ENV", "production"),
            ("AUTH_API_URL", "https://api.restaurant.test/"),
        ],
        AppConfig::load,
    );

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.auth_api_url, "https://api.restaurant.test");
    assert!(config.cookie_secure);
}

#[test]
#[serial]
fn test_app_config_cookie_secure_override() {
    let config = run_with_env(
        &[
            ("APP_ENV", "production"),
            ("AUTH_API_URL", "https://api.restaurant.test"),
            ("COOKIE_SECURE", "off"),
        ],
        AppConfig::load,
    );

    assert!(!config.cookie_secure);
}

#[test]
#[serial]
fn test_app_config_guard_overrides() {
    let config = run_with_env(
        &[
            ("GUARD_PROTECTED_PREFIXES", " /dashboard, /products ,, /reports"),
            ("GUARD_PUBLIC_ONLY_PATHS", "/login"),
            ("GUARD_LANDING_PATH", "/reports"),
        ],
        AppConfig::load,
    );

    assert_eq!(
        config.guard.protected_prefixes(),
        ["/dashboard", "/products", "/reports"]
    );
    assert_eq!(config.guard.public_only_paths(), ["/login"]);
    assert_eq!(config.guard.login_path(), "/login");
    assert_eq!(config.guard.landing_path(), "/reports");
}

#[test]
#[serial]
fn test_app_config_rejects_overlapping_guard_sets() {
    let result = run_with_env(
        &[
            ("GUARD_PROTECTED_PREFIXES", "/dashboard,/login"),
            ("GUARD_PUBLIC_ONLY_PATHS", "/login"),
        ],
        || panic::catch_unwind(AppConfig::load),
    );

    assert!(
        result.is_err(),
        "Overlapping guard sets should fail configuration loading"
    );
}
