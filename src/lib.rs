//! # Userportal (API client core)
//!
//! `userportal` is the client side of the user portal: login, signup, password
//! recovery and reset, profile editing and avatar upload against the portal's
//! REST backend.
//!
//! ## Layers
//!
//! - **Contract layer** ([`api`]): one typed method per backend endpoint. Every
//!   endpoint is described once by a static [`api::operation::Operation`] and
//!   every non-2xx response is normalized into `{status, body}`.
//! - **Safe request wrapper** ([`safe_request`]): the single call path used by
//!   UI-triggered flows. It interprets normalized errors, clears the session on
//!   `401`, and turns failures into notifications. Callers only ever see the
//!   success payload or `None`.
//! - **Session** ([`session`]): the authenticated user and access token, owned
//!   explicitly and observed through a `watch` subscription.
//!
//! ## Host boundary
//!
//! The surrounding UI implements [`ui::UiHost`]: "show notification" and
//! "navigate to path". The `portal` binary implements both on the terminal.
//!
//! Tokens and passwords are held in `SecretString` and must never be logged.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod forms;
pub mod i18n;
pub mod routes;
pub mod safe_request;
pub mod session;
pub mod ui;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
