//! HTTP transport for the API client.
//!
//! The contract layer builds an [`ApiRequest`] and hands it to a [`Transport`];
//! the transport only moves bytes and reports the status. Status interpretation
//! stays in the client so every transport normalizes failures the same way.
//!
//! [`HttpTransport`] is the `reqwest` implementation with fixed connect and
//! request timeouts. Hosts embedding the client elsewhere implement the trait.

use super::{error::ApiError, operation::Operation};
use async_trait::async_trait;
use reqwest::{
    Client,
    header::ACCEPT,
    multipart::{Form, Part},
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;
use tracing::{Instrument, debug, info_span};
use url::Url;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
    Multipart(Vec<FilePart>),
}

pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FilePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePart")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug)]
pub struct ApiRequest {
    pub operation: Operation,
    pub url: Url,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub bearer: Option<SecretString>,
}

/// Raw response: status plus the undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the raw response, including 4xx/5xx.
    /// # Errors
    /// Returns an error only when no response was received.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport with the default timeouts.
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(user_agent: &str) -> Result<Self, ApiError> {
        Self::with_timeouts(user_agent, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_timeouts(
        user_agent: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|err| ApiError::Request(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let ApiRequest {
            operation,
            url,
            query,
            body,
            bearer,
        } = request;

        debug!("api request: {} {}", operation.method.as_str(), url);

        let mut builder = self
            .client
            .request(operation.method.into(), url.clone())
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token.expose_secret());
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };

        let span = info_span!(
            "api.request",
            operation = operation.name,
            http.method = operation.method.as_str(),
            url = %url
        );
        async move {
            let response = builder
                .send()
                .await
                .map_err(|err| ApiError::from_reqwest(&err))?;
            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|err| ApiError::from_reqwest(&err))?;
            debug!("api response: {status}");
            Ok(ApiResponse {
                status,
                body: body.to_vec(),
            })
        }
        .instrument(span)
        .await
    }
}

fn multipart_form(parts: Vec<FilePart>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for file in parts {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|err| ApiError::Request(format!("invalid content type: {err}")))?;
        form = form.part(file.field, part);
    }
    Ok(form)
}
