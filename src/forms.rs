//! Client-side form rules. Each form either yields the request payload for
//! its endpoint or the ordered list of field errors to show next to inputs.
//! The backend validates again; these checks only save a round trip.

use crate::{
    api::models::{AvatarUpload, LoginForm, NewPassword, User, UserCreate, UserUpdate},
    i18n::Catalog,
};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::{fmt, sync::LazyLock};

pub const MIN_EMAIL_LENGTH: usize = 5;
pub const MIN_USERNAME_LENGTH: usize = 4;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_TEXT_LENGTH: usize = 255;
pub const MAX_AVATAR_BYTES: usize = 5_000_000;
pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub key: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl FieldError {
    fn new(field: &'static str, key: &'static str) -> Self {
        Self {
            field,
            key,
            params: Vec::new(),
        }
    }

    fn with_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn message(&self, catalog: &Catalog) -> String {
        let params: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        catalog.format(self.key, &params)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First error for `field`; inputs show one message at a time.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|error| error.field == field)
    }

    /// Localized messages in form order.
    #[must_use]
    pub fn messages(&self, catalog: &Catalog) -> Vec<String> {
        self.0.iter().map(|error| error.message(catalog)).collect()
    }

    fn push(&mut self, error: Option<FieldError>) {
        self.0.extend(error);
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<_> = self.0.iter().map(|error| error.field).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for FormErrors {}

fn length(
    field: &'static str,
    value: &str,
    min: Option<usize>,
    max: usize,
) -> Option<FieldError> {
    let count = value.chars().count();
    if let Some(min) = min.filter(|min| count < *min) {
        return Some(
            FieldError::new(field, "forms.errors.min_length")
                .with_param("min_length", min.to_string()),
        );
    }
    (count > max).then(|| {
        FieldError::new(field, "forms.errors.max_length").with_param("max_length", max.to_string())
    })
}

#[must_use]
pub fn check_email(field: &'static str, value: &str) -> Option<FieldError> {
    let value = value.trim();
    length(field, value, Some(MIN_EMAIL_LENGTH), MAX_TEXT_LENGTH).or_else(|| {
        let valid = EMAIL_PATTERN
            .as_ref()
            .is_some_and(|regex| regex.is_match(value));
        (!valid).then(|| FieldError::new(field, "auth.errors.email"))
    })
}

#[must_use]
pub fn check_text(field: &'static str, value: &str) -> Option<FieldError> {
    length(field, value.trim(), None, MAX_TEXT_LENGTH)
}

#[must_use]
pub fn check_username(field: &'static str, value: &str) -> Option<FieldError> {
    length(field, value.trim(), Some(MIN_USERNAME_LENGTH), MAX_TEXT_LENGTH)
}

#[must_use]
pub fn check_password(field: &'static str, value: &str) -> Option<FieldError> {
    length(field, value, Some(MIN_PASSWORD_LENGTH), MAX_TEXT_LENGTH)
}

#[must_use]
pub fn is_password_strong(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c))
}

#[must_use]
pub fn check_strong_password(field: &'static str, value: &str) -> Option<FieldError> {
    check_password(field, value).or_else(|| {
        (!is_password_strong(value))
            .then(|| FieldError::new(field, "auth.errors.password_strength"))
    })
}

#[must_use]
pub fn check_password_confirm(
    field: &'static str,
    password: &str,
    confirm: &str,
) -> Option<FieldError> {
    (password != confirm).then(|| FieldError::new(field, "auth.errors.password_match"))
}

/// Size and type limits for avatar uploads.
#[must_use]
pub fn check_avatar(field: &'static str, avatar: &AvatarUpload) -> Option<FieldError> {
    if avatar.bytes.len() > MAX_AVATAR_BYTES {
        return Some(
            FieldError::new(field, "forms.errors.max_file_size")
                .with_param("max_file_size", "5MB"),
        );
    }
    (!ACCEPTED_IMAGE_TYPES.contains(&avatar.content_type.as_str())).then(|| {
        let types: Vec<_> = ACCEPTED_IMAGE_TYPES
            .iter()
            .map(|kind| kind.trim_start_matches("image/"))
            .collect();
        FieldError::new(field, "forms.errors.accepted_image_types")
            .with_param("accepted_image_types", types.join(","))
    })
}

/// # Errors
/// Returns the field errors when the email or password is malformed.
pub fn login(email: &str, password: SecretString) -> Result<LoginForm, FormErrors> {
    let mut errors = FormErrors::default();
    errors.push(check_email("email", email));
    errors.push(check_password("password", password.expose_secret()));
    errors.into_result(LoginForm::new(email, password))
}

/// # Errors
/// Returns the field errors when the email is malformed.
pub fn recover_password(email: &str) -> Result<String, FormErrors> {
    let mut errors = FormErrors::default();
    errors.push(check_email("email", email));
    errors.into_result(email.trim().to_string())
}

/// # Errors
/// Returns the field errors for a weak or unconfirmed password, or a blank token.
pub fn reset_password(
    token: &str,
    password: SecretString,
    confirm: &SecretString,
) -> Result<NewPassword, FormErrors> {
    let mut errors = FormErrors::default();
    if token.trim().is_empty() {
        errors.push(Some(FieldError::new("token", "auth.errors.invalid_token")));
    }
    errors.push(check_strong_password("password", password.expose_secret()));
    errors.push(check_password_confirm(
        "password_confirm",
        password.expose_secret(),
        confirm.expose_secret(),
    ));
    errors.into_result(NewPassword {
        token: token.trim().to_string(),
        password,
    })
}

#[derive(Debug)]
pub struct SignupInput {
    pub email: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: SecretString,
    pub password_confirm: SecretString,
}

/// # Errors
/// Returns every failing field, in form order.
pub fn signup(input: SignupInput) -> Result<UserCreate, FormErrors> {
    let mut errors = FormErrors::default();
    errors.push(check_email("email", &input.email));
    errors.push(check_username("username", &input.username));
    if let Some(first_name) = &input.first_name {
        errors.push(check_text("first_name", first_name));
    }
    if let Some(last_name) = &input.last_name {
        errors.push(check_text("last_name", last_name));
    }
    errors.push(check_strong_password("password", input.password.expose_secret()));
    errors.push(check_password_confirm(
        "password_confirm",
        input.password.expose_secret(),
        input.password_confirm.expose_secret(),
    ));
    errors.into_result(UserCreate {
        email: input.email.trim().to_string(),
        username: input.username.trim().to_string(),
        first_name: non_blank(input.first_name),
        last_name: non_blank(input.last_name),
        password: input.password,
    })
}

/// Profile edits; `None` leaves a field as it is.
#[derive(Clone, Debug, Default)]
pub struct ProfileInput {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Validate the edited fields and keep only the ones that differ from
/// `current`. An empty update means nothing changed.
/// # Errors
/// Returns every failing field, in form order.
pub fn edit_profile(current: &User, input: ProfileInput) -> Result<UserUpdate, FormErrors> {
    let mut errors = FormErrors::default();
    if let Some(email) = &input.email {
        errors.push(check_email("email", email));
    }
    if let Some(username) = &input.username {
        errors.push(check_username("username", username));
    }
    if let Some(first_name) = &input.first_name {
        errors.push(check_text("first_name", first_name));
    }
    if let Some(last_name) = &input.last_name {
        errors.push(check_text("last_name", last_name));
    }

    let changed = |value: Option<String>, existing: Option<&str>| {
        value
            .map(|value| value.trim().to_string())
            .filter(|value| Some(value.as_str()) != existing)
    };
    errors.into_result(UserUpdate {
        email: changed(input.email, Some(current.email.as_str())),
        username: changed(input.username, Some(current.username.as_str())),
        first_name: changed(input.first_name, current.first_name.as_deref()),
        last_name: changed(input.last_name, current.last_name.as_deref()),
        password: None,
    })
}

/// # Errors
/// Returns the field errors for a weak or unconfirmed password.
pub fn edit_password(
    password: SecretString,
    confirm: &SecretString,
) -> Result<UserUpdate, FormErrors> {
    let mut errors = FormErrors::default();
    errors.push(check_strong_password("password", password.expose_secret()));
    errors.push(check_password_confirm(
        "password_confirm",
        password.expose_secret(),
        confirm.expose_secret(),
    ));
    errors.into_result(UserUpdate {
        password: Some(password),
        ..UserUpdate::default()
    })
}

/// # Errors
/// Returns the avatar error when the file is too large or not an image.
pub fn avatar(upload: AvatarUpload) -> Result<AvatarUpload, FormErrors> {
    let mut errors = FormErrors::default();
    errors.push(check_avatar("avatar", &upload));
    errors.into_result(upload)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
