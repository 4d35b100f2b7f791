use secrecy::SecretString;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared bearer token used to authenticate API calls.
///
/// The client reads it for every request and the session writes it on sign-in
/// and sign-out; both hold a clone of the same handle.
#[derive(Clone, Default)]
pub struct Credentials {
    token: Arc<RwLock<Option<SecretString>>>,
}

impl Credentials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: SecretString) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    #[must_use]
    pub fn get(&self) -> Option<SecretString> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.is_set().then_some("[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn clones_share_the_token() {
        let credentials = Credentials::new();
        let shared = credentials.clone();
        assert!(!shared.is_set());

        credentials.set(SecretString::from("abc".to_string()));
        assert_eq!(
            shared.get().map(|t| t.expose_secret().to_string()),
            Some("abc".to_string())
        );

        shared.clear();
        assert!(!credentials.is_set());
    }

    #[test]
    fn debug_never_prints_token() {
        let credentials = Credentials::new();
        credentials.set(SecretString::from("super-secret".to_string()));
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
