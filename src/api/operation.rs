//! Static endpoint descriptors.
//!
//! An [`Operation`] names the method, URL template, request media type and the
//! declared success statuses of one backend endpoint. Every endpoint also
//! declares `422` with the shared validation-error body, so that case is not
//! repeated per descriptor.

use super::error::ApiError;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// Request payload encoding declared by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// No request body.
    None,
    Json,
    FormUrlEncoded,
    Multipart,
}

impl MediaType {
    #[must_use]
    pub const fn content_type(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json => Some("application/json"),
            Self::FormUrlEncoded => Some("application/x-www-form-urlencoded"),
            Self::Multipart => Some("multipart/form-data"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path template; `{name}` segments are path parameters.
    pub path: &'static str,
    pub media_type: MediaType,
    pub success: &'static [u16],
}

/// Status code of the shared validation-error response.
pub const VALIDATION_ERROR_STATUS: u16 = 422;

pub const LOGIN: Operation = Operation {
    name: "login",
    method: HttpMethod::Post,
    path: "/api/login",
    media_type: MediaType::FormUrlEncoded,
    success: &[200],
};

pub const REQUEST_PASSWORD_RECOVERY: Operation = Operation {
    name: "request_password_recovery",
    method: HttpMethod::Post,
    path: "/api/recover-password/{email}",
    media_type: MediaType::None,
    success: &[204],
};

pub const RESET_PASSWORD: Operation = Operation {
    name: "reset_password",
    method: HttpMethod::Post,
    path: "/api/reset-password/",
    media_type: MediaType::Json,
    success: &[200, 201],
};

pub const CREATE_USER: Operation = Operation {
    name: "create_user",
    method: HttpMethod::Post,
    path: "/api/v1/users/",
    media_type: MediaType::Json,
    success: &[201],
};

pub const SEARCH_USERS: Operation = Operation {
    name: "search_users",
    method: HttpMethod::Get,
    path: "/api/v1/users/",
    media_type: MediaType::None,
    success: &[200],
};

pub const GET_CURRENT_USER: Operation = Operation {
    name: "get_current_user",
    method: HttpMethod::Get,
    path: "/api/v1/users/me",
    media_type: MediaType::None,
    success: &[200],
};

pub const GET_USER_BY_ID: Operation = Operation {
    name: "get_user_by_id",
    method: HttpMethod::Get,
    path: "/api/v1/users/{user_id}",
    media_type: MediaType::None,
    success: &[200],
};

pub const UPDATE_USER: Operation = Operation {
    name: "update_user",
    method: HttpMethod::Patch,
    path: "/api/v1/users/{user_id}",
    media_type: MediaType::Json,
    success: &[200, 201],
};

pub const DELETE_USER: Operation = Operation {
    name: "delete_user",
    method: HttpMethod::Delete,
    path: "/api/v1/users/{user_id}",
    media_type: MediaType::None,
    success: &[204],
};

pub const SET_USER_AVATAR: Operation = Operation {
    name: "set_user_avatar",
    method: HttpMethod::Post,
    path: "/api/v1/users/{user_id}/avatar",
    media_type: MediaType::Multipart,
    success: &[201],
};

pub const ALL: [Operation; 10] = [
    LOGIN,
    REQUEST_PASSWORD_RECOVERY,
    RESET_PASSWORD,
    CREATE_USER,
    SEARCH_USERS,
    GET_CURRENT_USER,
    GET_USER_BY_ID,
    UPDATE_USER,
    DELETE_USER,
    SET_USER_AVATAR,
];

impl Operation {
    #[must_use]
    pub fn is_declared_success(&self, status: u16) -> bool {
        self.success.contains(&status)
    }

    /// Names of the `{param}` placeholders in the path template, in order.
    pub fn path_params(&self) -> impl Iterator<Item = &'static str> {
        self.path.split('/').filter_map(placeholder)
    }

    /// Resolve the path template against `base`.
    ///
    /// Parameter values are percent-encoded as single path segments, so a value
    /// can never introduce extra path components.
    ///
    /// # Errors
    /// Returns an error if `base` cannot carry a path or a placeholder has no value.
    pub fn url(&self, base: &Url, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::Request(format!("invalid base URL: {base}")))?;
            segments.pop_if_empty();

            for part in self.path.trim_start_matches('/').split('/') {
                match placeholder(part) {
                    Some(name) => {
                        let value = params
                            .iter()
                            .find(|(key, _)| *key == name)
                            .map(|(_, value)| *value)
                            .ok_or_else(|| {
                                ApiError::Request(format!(
                                    "{}: missing path parameter {name}",
                                    self.name
                                ))
                            })?;
                        segments.push(value);
                    }
                    None => {
                        segments.push(part);
                    }
                }
            }
        }
        url.set_query(None);
        Ok(url)
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{').and_then(|s| s.strip_suffix('}'))
}
