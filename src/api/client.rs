//! Client methods for the portal API endpoints. Each method binds one
//! [`Operation`] to its input and success types; the shared `execute` path
//! attaches the bearer token, checks the status and normalizes failures.

use super::{
    credentials::Credentials,
    error::{ApiError, NormalizedError},
    models::{
        AvatarUpload, LoginForm, NewPassword, SearchUsers, User, UserAndToken, UserCreate,
        UserUpdate,
    },
    operation::{self, MediaType, Operation},
    transport::{ApiRequest, FilePart, HttpTransport, RequestBody, Transport},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tracing::{debug, warn};
use url::Url;

pub struct ApiClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
    credentials: Credentials,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: Url, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url,
            transport,
            credentials: Credentials::new(),
        }
    }

    /// Client over [`HttpTransport`] with the given request timeout.
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn http(base_url: Url, user_agent: &str, timeout: Duration) -> Result<Self, ApiError> {
        let transport = HttpTransport::with_timeouts(
            user_agent,
            super::transport::DEFAULT_CONNECT_TIMEOUT.min(timeout),
            timeout,
        )?;
        Ok(Self::new(base_url, Arc::new(transport)))
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Token handle shared with the session.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Exchange credentials for a token and the user it belongs to.
    /// # Errors
    /// `400 auth.invalid.invalid_credentials` on a bad password, `422` on a malformed form.
    pub async fn login(&self, form: &LoginForm) -> Result<UserAndToken, ApiError> {
        self.execute(
            operation::LOGIN,
            &[],
            Vec::new(),
            RequestBody::Form(form.fields()),
        )
        .await
    }

    /// Ask the backend to email a password-reset link.
    /// # Errors
    /// `404` when no account uses `email`.
    pub async fn request_password_recovery(&self, email: &str) -> Result<(), ApiError> {
        self.execute(
            operation::REQUEST_PASSWORD_RECOVERY,
            &[("email", email.trim())],
            Vec::new(),
            RequestBody::Empty,
        )
        .await
    }

    /// # Errors
    /// `400 user.invalid.inactive` for disabled accounts; other 4xx for bad tokens.
    pub async fn reset_password(&self, body: &NewPassword) -> Result<User, ApiError> {
        self.execute(
            operation::RESET_PASSWORD,
            &[],
            Vec::new(),
            RequestBody::Json(to_json(body)?),
        )
        .await
    }

    /// Sign up. The response carries a token for the new account.
    /// # Errors
    /// `409 user.conflict.email_already_registered` when the email is taken.
    pub async fn create_user(&self, body: &UserCreate) -> Result<UserAndToken, ApiError> {
        self.execute(
            operation::CREATE_USER,
            &[],
            Vec::new(),
            RequestBody::Json(to_json(body)?),
        )
        .await
    }

    /// # Errors
    /// `401` without a valid session.
    pub async fn search_users(&self, params: &SearchUsers) -> Result<Vec<User>, ApiError> {
        self.execute(
            operation::SEARCH_USERS,
            &[],
            params.query_pairs(),
            RequestBody::Empty,
        )
        .await
    }

    /// Resolve the held token to its user.
    /// # Errors
    /// `401` means there is no valid session.
    pub async fn get_current_user(&self) -> Result<User, ApiError> {
        self.execute(
            operation::GET_CURRENT_USER,
            &[],
            Vec::new(),
            RequestBody::Empty,
        )
        .await
    }

    /// # Errors
    /// `404` for unknown ids, `403` when the caller may not read the user.
    pub async fn get_user(&self, user_id: i64) -> Result<User, ApiError> {
        let id = user_id.to_string();
        self.execute(
            operation::GET_USER_BY_ID,
            &[("user_id", &id)],
            Vec::new(),
            RequestBody::Empty,
        )
        .await
    }

    /// # Errors
    /// `409` when the new email is taken, `403` when the caller may not edit the user.
    pub async fn update_user(&self, user_id: i64, body: &UserUpdate) -> Result<User, ApiError> {
        let id = user_id.to_string();
        self.execute(
            operation::UPDATE_USER,
            &[("user_id", &id)],
            Vec::new(),
            RequestBody::Json(to_json(body)?),
        )
        .await
    }

    /// # Errors
    /// `403` when the caller may not delete the user.
    pub async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        let id = user_id.to_string();
        self.execute(
            operation::DELETE_USER,
            &[("user_id", &id)],
            Vec::new(),
            RequestBody::Empty,
        )
        .await
    }

    /// Upload a new avatar image as the `avatar` multipart field.
    /// # Errors
    /// `403` when the caller may not edit the user, `422` for a missing file.
    pub async fn set_user_avatar(
        &self,
        user_id: i64,
        avatar: &AvatarUpload,
    ) -> Result<User, ApiError> {
        let id = user_id.to_string();
        let part = FilePart {
            field: "avatar".to_string(),
            file_name: avatar.file_name.clone(),
            content_type: avatar.content_type.clone(),
            bytes: avatar.bytes.clone(),
        };
        self.execute(
            operation::SET_USER_AVATAR,
            &[("user_id", &id)],
            Vec::new(),
            RequestBody::Multipart(vec![part]),
        )
        .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: Operation,
        path_params: &[(&str, &str)],
        query: Vec<(String, String)>,
        body: RequestBody,
    ) -> Result<T, ApiError> {
        check_media_type(operation, &body)?;
        let url = operation.url(&self.base_url, path_params)?;

        let response = self
            .transport
            .send(ApiRequest {
                operation,
                url,
                query,
                body,
                bearer: self.credentials.get(),
            })
            .await?;

        if !(200..300).contains(&response.status) {
            let error = NormalizedError::from_body(response.status, &response.body);
            debug!("{} failed with status {}", operation.name, error.status);
            return Err(ApiError::Status(error));
        }

        if !operation.is_declared_success(response.status) {
            warn!(
                "{} returned undeclared success status {}",
                operation.name, response.status
            );
        }

        decode(&response.body)
    }
}

fn check_media_type(operation: Operation, body: &RequestBody) -> Result<(), ApiError> {
    let matches = matches!(
        (operation.media_type, body),
        (MediaType::None, RequestBody::Empty)
            | (MediaType::Json, RequestBody::Json(_))
            | (MediaType::FormUrlEncoded, RequestBody::Form(_))
            | (MediaType::Multipart, RequestBody::Multipart(_))
    );
    if matches {
        Ok(())
    } else {
        Err(ApiError::Request(format!(
            "{} expects a {:?} body",
            operation.name, operation.media_type
        )))
    }
}

fn to_json<B: serde::Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|err| ApiError::Request(format!("failed to encode request: {err}")))
}

/// Decode a success body; an empty body decodes as JSON `null` so `()` works
/// for `204` endpoints.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(body).map_err(|err| ApiError::Decode(err.to_string()))?
    };
    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}
