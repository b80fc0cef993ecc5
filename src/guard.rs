use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use thiserror::Error;

use crate::session;

// --- Deployment Defaults ---

/// Path prefixes that require an active session.
pub const DEFAULT_PROTECTED_PREFIXES: [&str; 6] = [
    "/dashboard",
    "/data",
    "/analytics",
    "/projects",
    "/team",
    "/settings",
];

/// Paths only meaningful without a session (login, registration).
pub const DEFAULT_PUBLIC_ONLY_PATHS: [&str; 2] = ["/login", "/register"];

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_LANDING_PATH: &str = "/dashboard";

/// PathClass
///
/// The static classification of a request path. Protected paths are matched by
/// prefix, public-only paths by exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Protected,
    PublicOnly,
    Unclassified,
}

/// Outcome
///
/// The terminal state reached by a single guard evaluation. Exactly one is
/// produced per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request proceeds to its original destination unmodified.
    Allow,
    /// No session on a protected path: send the client to the login page.
    RedirectToLogin,
    /// A session on a public-only path: send the client to the landing page.
    RedirectToLanding,
}

/// GuardConfigError
///
/// Raised while building a `GuardConfig` whose path sets would make the guard
/// ambiguous or loop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuardConfigError {
    #[error("path `{0}` must start with `/`")]
    NotAbsolute(String),
    #[error("public-only path `{path}` is also matched by protected prefix `{prefix}`")]
    Overlap { path: String, prefix: String },
    #[error("login path `{path}` is matched by protected prefix `{prefix}`")]
    LoginPathProtected { path: String, prefix: String },
    #[error("landing path `{0}` is a public-only path")]
    LandingPathPublicOnly(String),
}

/// GuardConfig
///
/// The immutable configuration of the route access guard: two ordered path sets
/// and two redirect targets. Constructed once at startup and shared by reference
/// (`GuardState`) with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    protected_prefixes: Vec<String>,
    public_only_paths: Vec<String>,
    login_path: String,
    landing_path: String,
}

/// GuardState
///
/// The shared, read-only handle the middleware receives from the application state.
pub type GuardState = Arc<GuardConfig>;

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            protected_prefixes: DEFAULT_PROTECTED_PREFIXES.map(String::from).to_vec(),
            public_only_paths: DEFAULT_PUBLIC_ONLY_PATHS.map(String::from).to_vec(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            landing_path: DEFAULT_LANDING_PATH.to_string(),
        }
    }
}

impl GuardConfig {
    /// new
    ///
    /// Builds and validates a guard configuration.
    ///
    /// Duplicate entries are collapsed, keeping the first occurrence. The two sets
    /// must be disjoint under the matching rules: no public-only path may start with
    /// a protected prefix. The login target must not itself be protected and the
    /// landing target must not be public-only, otherwise a client would be
    /// redirected back to the page it was just sent to.
    pub fn new<P, Q>(
        protected_prefixes: P,
        public_only_paths: Q,
        login_path: impl Into<String>,
        landing_path: impl Into<String>,
    ) -> Result<Self, GuardConfigError>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        Q: IntoIterator,
        Q::Item: Into<String>,
    {
        let protected_prefixes = collect_paths(protected_prefixes)?;
        let public_only_paths = collect_paths(public_only_paths)?;
        let login_path = absolute(login_path.into())?;
        let landing_path = absolute(landing_path.into())?;

        for path in &public_only_paths {
            if let Some(prefix) = matching_prefix(&protected_prefixes, path) {
                return Err(GuardConfigError::Overlap {
                    path: path.clone(),
                    prefix: prefix.to_string(),
                });
            }
        }

        if let Some(prefix) = matching_prefix(&protected_prefixes, &login_path) {
            return Err(GuardConfigError::LoginPathProtected {
                path: login_path,
                prefix: prefix.to_string(),
            });
        }

        if public_only_paths.contains(&landing_path) {
            return Err(GuardConfigError::LandingPathPublicOnly(landing_path));
        }

        Ok(Self {
            protected_prefixes,
            public_only_paths,
            login_path,
            landing_path,
        })
    }

    pub fn protected_prefixes(&self) -> &[String] {
        &self.protected_prefixes
    }

    pub fn public_only_paths(&self) -> &[String] {
        &self.public_only_paths
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    /// classify
    ///
    /// Places a path in exactly one of the three classes. Prefix matching is plain
    /// string matching, so `/dashboards` is covered by `/dashboard`.
    pub fn classify(&self, path: &str) -> PathClass {
        if matching_prefix(&self.protected_prefixes, path).is_some() {
            PathClass::Protected
        } else if self.public_only_paths.iter().any(|p| p == path) {
            PathClass::PublicOnly
        } else {
            PathClass::Unclassified
        }
    }

    /// applies_to
    ///
    /// The activation scope: the middleware only inspects requests whose path falls
    /// in one of the configured sets.
    pub fn applies_to(&self, path: &str) -> bool {
        self.classify(path) != PathClass::Unclassified
    }

    /// evaluate
    ///
    /// The guard decision. A pure function of the path and the presence of a token;
    /// an empty token counts as absent and the token's content is never inspected.
    pub fn evaluate(&self, path: &str, token: Option<&str>) -> Outcome {
        let has_session = token.is_some_and(|t| !t.is_empty());

        match self.classify(path) {
            PathClass::Protected if !has_session => Outcome::RedirectToLogin,
            PathClass::PublicOnly if has_session => Outcome::RedirectToLanding,
            _ => Outcome::Allow,
        }
    }

    /// Where a redirecting outcome sends the client. `None` for `Allow`.
    pub fn redirect_target(&self, outcome: Outcome) -> Option<&str> {
        match outcome {
            Outcome::Allow => None,
            Outcome::RedirectToLogin => Some(&self.login_path),
            Outcome::RedirectToLanding => Some(&self.landing_path),
        }
    }
}

fn absolute(path: String) -> Result<String, GuardConfigError> {
    if path.starts_with('/') {
        Ok(path)
    } else {
        Err(GuardConfigError::NotAbsolute(path))
    }
}

fn collect_paths<I>(paths: I) -> Result<Vec<String>, GuardConfigError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for path in paths {
        let path = absolute(path.into())?;
        if !out.contains(&path) {
            out.push(path);
        }
    }
    Ok(out)
}

fn matching_prefix<'a>(prefixes: &'a [String], path: &str) -> Option<&'a str> {
    prefixes
        .iter()
        .find(|prefix| path.starts_with(prefix.as_str()))
        .map(String::as_str)
}

/// route_guard
///
/// Middleware that runs the guard in front of every page. Requests outside the
/// activation scope, and requests the guard allows, continue down the stack
/// untouched; otherwise the response is replaced by a temporary redirect and no
/// further handler runs.
pub async fn route_guard(
    State(guard): State<GuardState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    if !guard.applies_to(&path) {
        return next.run(request).await;
    }

    let token = session::token_from_headers(request.headers());
    let outcome = guard.evaluate(&path, token.as_deref());

    match guard.redirect_target(outcome) {
        Some(target) => {
            tracing::debug!(path = %path, outcome = ?outcome, target = %target, "route guard redirect");
            Redirect::temporary(target).into_response()
        }
        None => {
            tracing::debug!(path = %path, outcome = ?outcome, "route guard pass-through");
            next.run(request).await
        }
    }
}
