//! Page paths and the guard deciding who may open them.

pub const HOME: &str = "/";
pub const APP: &str = "/app";
pub const LOGIN: &str = "/auth/login";
pub const LOGOUT: &str = "/auth/logout";
pub const SIGNUP: &str = "/auth/signup";
pub const RECOVER_PASSWORD: &str = "/auth/recover-password";
pub const RESET_PASSWORD: &str = "/auth/reset-password";

/// Pages for signing in; signed-in users are sent home instead.
pub const AUTH_ROUTES: [&str; 4] = [LOGIN, SIGNUP, RECOVER_PASSWORD, RESET_PASSWORD];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
    /// End the session, then show the login page.
    SignOut,
}

/// `path` without query string, fragment or trailing slash.
#[must_use]
pub fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => HOME,
        trimmed => trimmed,
    }
}

#[must_use]
pub fn is_auth_route(path: &str) -> bool {
    AUTH_ROUTES.contains(&normalize(path))
}

/// Reachable without a session: home plus the auth pages.
#[must_use]
pub fn is_public_route(path: &str) -> bool {
    normalize(path) == HOME || is_auth_route(path)
}

#[must_use]
pub fn guard(path: &str, authenticated: bool) -> GuardDecision {
    let path = normalize(path);
    if path == LOGOUT {
        return GuardDecision::SignOut;
    }
    match (authenticated, is_auth_route(path), is_public_route(path)) {
        (true, true, _) => GuardDecision::Redirect(HOME),
        (false, _, false) => GuardDecision::Redirect(LOGIN),
        _ => GuardDecision::Allow,
    }
}
