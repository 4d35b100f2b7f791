//! Typed bindings for the portal REST API.
//!
//! Each endpoint is declared once as an [`operation::Operation`] and exposed as a
//! method on [`client::ApiClient`]. This layer performs the network call and
//! normalizes failures into [`error::ApiError`]; it never retries, caches, or
//! talks to the UI. Interpreting failures is the job of
//! [`crate::safe_request`].

pub mod client;
pub mod credentials;
pub mod error;
pub mod models;
pub mod operation;
pub mod transport;

pub use client::ApiClient;
pub use credentials::Credentials;
pub use error::{ApiError, NormalizedError, ValidationIssue};
pub use transport::{HttpTransport, Transport};
