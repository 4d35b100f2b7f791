//! Client session: who is signed in and with which token.
//!
//! A [`Session`] is the only owner of the current user. It shares its token
//! handle with the [`ApiClient`](crate::api::ApiClient) so requests pick up
//! sign-in and sign-out immediately, and mirrors the token into the
//! [`CredentialStore`] so the next start can probe it. Observers follow state
//! changes through [`Session::subscribe`].

pub mod store;

pub use store::{
    ACCESS_TOKEN_SLOT, CredentialStore, FileStore, LOCALE_SLOT, MemoryStore, StoreError,
};

use crate::api::{Credentials, models::User};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

pub struct Session {
    state: watch::Sender<SessionState>,
    credentials: Credentials,
    store: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &*self.state.borrow())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Starts anonymous; call [`Session::sign_in`] once a user is known.
    #[must_use]
    pub fn new(credentials: Credentials, store: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Anonymous);
        Self {
            state,
            credentials,
            store,
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Token saved by a previous run, if any.
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn persisted_token(&self) -> Result<Option<SecretString>, StoreError> {
        Ok(self
            .store
            .get(ACCESS_TOKEN_SLOT)?
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from))
    }

    /// Hold `token` for requests without changing who is signed in. Used by
    /// the startup probe before the user is known.
    pub fn adopt_token(&self, token: SecretString) {
        self.credentials.set(token);
    }

    /// Enter `authenticated`. A new token replaces the held one and is
    /// persisted; `None` keeps the current token (startup probe).
    /// # Errors
    /// Returns an error if the token cannot be persisted. The in-memory
    /// session is updated regardless.
    pub fn sign_in(&self, user: User, token: Option<SecretString>) -> Result<(), StoreError> {
        let persisted = match token {
            Some(token) => {
                let result = self.store.set(ACCESS_TOKEN_SLOT, token.expose_secret());
                self.credentials.set(token);
                result
            }
            None => Ok(()),
        };
        debug!("session authenticated: user {}", user.id);
        self.state.send_replace(SessionState::Authenticated(user));
        persisted
    }

    /// Replace the user record after a profile change, keeping the token.
    /// Ignored while anonymous.
    pub fn refresh_user(&self, user: User) {
        self.state.send_if_modified(|state| match state {
            SessionState::Authenticated(current) if *current != user => {
                *current = user;
                true
            }
            _ => false,
        });
    }

    /// Enter `anonymous`: drop the user, the held token and the persisted one.
    /// Safe to call repeatedly.
    pub fn clear(&self) {
        self.credentials.clear();
        if let Err(err) = self.store.remove(ACCESS_TOKEN_SLOT) {
            warn!("failed to remove persisted token: {err}");
        }
        let previous = self.state.send_replace(SessionState::Anonymous);
        if previous.is_authenticated() {
            debug!("session cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn user(id: i64) -> User {
        User {
            id,
            email: format!("user{id}@example.com"),
            username: format!("user{id}"),
            first_name: None,
            last_name: None,
            is_active: true,
            avatar_url: None,
        }
    }

    fn session() -> (Session, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (Session::new(Credentials::new(), store.clone()), store)
    }

    #[test]
    fn starts_anonymous() {
        let (session, _) = session();
        assert_eq!(session.state(), SessionState::Anonymous);
        assert!(session.current_user().is_none());
        assert!(!session.credentials().is_set());
    }

    #[test]
    fn sign_in_persists_token_and_notifies() -> Result<()> {
        let (session, store) = session();
        let mut rx = session.subscribe();

        session.sign_in(user(1), Some(SecretString::from("tok".to_string())))?;

        assert!(rx.has_changed()?);
        assert_eq!(rx.borrow_and_update().user().map(|u| u.id), Some(1));
        assert!(session.credentials().is_set());
        assert_eq!(store.get(ACCESS_TOKEN_SLOT)?.as_deref(), Some("tok"));
        Ok(())
    }

    #[test]
    fn clear_removes_everything() -> Result<()> {
        let (session, store) = session();
        session.sign_in(user(1), Some(SecretString::from("tok".to_string())))?;
        store.set(LOCALE_SLOT, "fr")?;

        session.clear();
        session.clear();

        assert!(!session.is_authenticated());
        assert!(!session.credentials().is_set());
        assert_eq!(store.get(ACCESS_TOKEN_SLOT)?, None);
        assert_eq!(store.get(LOCALE_SLOT)?.as_deref(), Some("fr"));
        Ok(())
    }

    #[test]
    fn refresh_user_only_when_authenticated() -> Result<()> {
        let (session, _) = session();
        session.refresh_user(user(2));
        assert!(!session.is_authenticated());

        session.sign_in(user(1), None)?;
        let mut renamed = user(1);
        renamed.first_name = Some("Ada".to_string());
        session.refresh_user(renamed.clone());
        assert_eq!(session.current_user(), Some(renamed));
        Ok(())
    }

    #[test]
    fn persisted_token_ignores_blank_values() -> Result<()> {
        let (session, store) = session();
        store.set(ACCESS_TOKEN_SLOT, "  ")?;
        assert!(session.persisted_token()?.is_none());
        store.set(ACCESS_TOKEN_SLOT, "tok")?;
        assert_eq!(
            session
                .persisted_token()?
                .map(|t| t.expose_secret().to_string()),
            Some("tok".to_string())
        );
        Ok(())
    }
}
