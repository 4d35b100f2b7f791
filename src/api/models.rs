//! Request and response payloads. Password fields are `SecretString` and are
//! only exposed while serializing the request body; never log these values.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;

/// User as returned by the API; also the value held by the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl User {
    /// Name shown in greetings: full name when known, username otherwise.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.to_string(),
            (None, None) => self.username.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    #[serde(serialize_with = "expose", deserialize_with = "secret")]
    pub access_token: SecretString,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Login and signup response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserAndToken {
    pub user: User,
    pub token: Token,
}

/// OAuth2 password-grant form sent to the login endpoint.
#[derive(Debug)]
pub struct LoginForm {
    /// The account email; the backend names this field `username`.
    pub username: String,
    pub password: SecretString,
    pub grant_type: Option<String>,
    pub scope: String,
    pub client_id: Option<String>,
    pub client_secret: Option<SecretString>,
}

impl LoginForm {
    #[must_use]
    pub fn new(email: &str, password: SecretString) -> Self {
        Self {
            username: email.trim().to_string(),
            password,
            grant_type: None,
            scope: String::new(),
            client_id: None,
            client_secret: None,
        }
    }

    /// Form fields in wire order. Optional fields are omitted when unset.
    pub(crate) fn fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::with_capacity(6);
        if let Some(grant_type) = &self.grant_type {
            fields.push(("grant_type".to_string(), grant_type.clone()));
        }
        fields.push(("username".to_string(), self.username.clone()));
        fields.push((
            "password".to_string(),
            self.password.expose_secret().to_string(),
        ));
        fields.push(("scope".to_string(), self.scope.clone()));
        if let Some(client_id) = &self.client_id {
            fields.push(("client_id".to_string(), client_id.clone()));
        }
        if let Some(client_secret) = &self.client_secret {
            fields.push((
                "client_secret".to_string(),
                client_secret.expose_secret().to_string(),
            ));
        }
        fields
    }
}

#[derive(Debug, Serialize)]
pub struct NewPassword {
    pub token: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

/// Signup payload.
#[derive(Debug, Serialize)]
pub struct UserCreate {
    pub email: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

/// Partial update; unset fields are left untouched by the backend.
#[derive(Debug, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "expose_optional"
    )]
    pub password: Option<SecretString>,
}

impl UserUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.username.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.password.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchUsers {
    pub query: Option<String>,
    pub offset: Option<u32>,
}

impl SearchUsers {
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(query) = &self.query {
            pairs.push(("query".to_string(), query.clone()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        pairs
    }
}

/// Image file sent as the `avatar` multipart field.
#[derive(Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for AvatarUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl AvatarUpload {
    /// Read an image from disk; the content type is inferred from the extension.
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map_or_else(|| "avatar".to_string(), |name| name.to_string_lossy().into_owned());
        Ok(Self {
            content_type: content_type_for(path).to_string(),
            file_name,
            bytes,
        })
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Flash message pushed by the server-rendered pages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    pub content: String,
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: ServerMessageKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerMessageKind {
    Error,
    Default,
}

#[allow(clippy::ref_option)]
fn expose_optional<S: Serializer>(
    secret: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(secret) => serializer.serialize_some(secret.expose_secret()),
        None => serializer.serialize_none(),
    }
}

fn secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;
    use std::io::Write;

    fn user() -> User {
        User {
            id: 7,
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
            first_name: None,
            last_name: None,
            is_active: true,
            avatar_url: None,
        }
    }

    #[test]
    fn user_accepts_missing_optional_fields() -> Result<()> {
        let parsed: User = serde_json::from_value(json!({
            "id": 7,
            "email": "ada@example.com",
            "username": "ada",
            "is_active": true
        }))?;
        assert_eq!(parsed, user());
        Ok(())
    }

    #[test]
    fn display_name_prefers_full_name() {
        let mut u = user();
        assert_eq!(u.display_name(), "ada");
        u.first_name = Some("Ada".to_string());
        assert_eq!(u.display_name(), "Ada");
        u.last_name = Some("Lovelace".to_string());
        assert_eq!(u.display_name(), "Ada Lovelace");
    }

    #[test]
    fn token_defaults_to_bearer() -> Result<()> {
        let token: Token = serde_json::from_value(json!({"access_token": "abc"}))?;
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.access_token.expose_secret(), "abc");
        Ok(())
    }

    #[test]
    fn login_form_omits_unset_optionals() {
        let form = LoginForm::new(
            " ada@example.com ",
            SecretString::from("S3cret!pass".to_string()),
        );
        let names: Vec<_> = form.fields().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["username", "password", "scope"]);
        assert_eq!(form.fields()[0].1, "ada@example.com");
    }

    #[test]
    fn login_form_debug_redacts_password() {
        let form = LoginForm::new("ada@example.com", SecretString::from("S3cret!pass".to_string()));
        assert!(!format!("{form:?}").contains("S3cret!pass"));
    }

    #[test]
    fn user_update_serializes_only_set_fields() -> Result<()> {
        let update = UserUpdate {
            first_name: Some("Ada".to_string()),
            password: Some(SecretString::from("N3w!password".to_string())),
            ..UserUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update)?,
            json!({"first_name": "Ada", "password": "N3w!password"})
        );
        assert!(UserUpdate::default().is_empty());
        assert!(!update.is_empty());
        Ok(())
    }

    #[test]
    fn search_users_query_pairs() {
        assert!(SearchUsers::default().query_pairs().is_empty());
        let search = SearchUsers {
            query: Some("ada".to_string()),
            offset: Some(20),
        };
        assert_eq!(
            search.query_pairs(),
            vec![
                ("query".to_string(), "ada".to_string()),
                ("offset".to_string(), "20".to_string())
            ]
        );
    }

    #[test]
    fn avatar_from_path_infers_content_type() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("Me.PNG");
        std::fs::File::create(&path)?.write_all(&[0x89, b'P', b'N', b'G'])?;

        let avatar = AvatarUpload::from_path(&path)?;
        assert_eq!(avatar.file_name, "Me.PNG");
        assert_eq!(avatar.content_type, "image/png");
        assert_eq!(avatar.bytes.len(), 4);
        assert!(format!("{avatar:?}").contains("size: 4"));
        Ok(())
    }

    #[test]
    fn server_message_parses_kind() -> Result<()> {
        let message: ServerMessage = serde_json::from_value(json!({
            "content": "user.update_success",
            "timestamp": 1_700_000_000,
            "type": "default"
        }))?;
        assert_eq!(message.kind, ServerMessageKind::Default);
        Ok(())
    }
}
