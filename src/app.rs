//! User flows on top of the API client, the session and the host UI.
//!
//! Every backend call made here goes through [`SafeRequest`], so a flow only
//! deals with the success value. Form errors are shown through the same
//! notification channel before any request is sent.

use crate::{
    api::{
        ApiClient, ApiError,
        models::{AvatarUpload, SearchUsers, ServerMessage, ServerMessageKind, User},
    },
    forms::{self, FormErrors, ProfileInput, SignupInput},
    i18n::{Catalog, Locale},
    routes::{self, GuardDecision},
    safe_request::SafeRequest,
    session::{CredentialStore, LOCALE_SLOT, Session, SessionState, StoreError},
    ui::{Severity, UiHost},
};
use secrecy::SecretString;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, info, warn};

pub struct App {
    client: ApiClient,
    session: Arc<Session>,
    ui: Arc<dyn UiHost>,
    locale: RwLock<Locale>,
    last_server_message: Mutex<Option<(String, i64)>>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("client", &self.client)
            .field("session", &self.session)
            .field("locale", &self.locale())
            .finish_non_exhaustive()
    }
}

impl App {
    /// The session shares the client's token handle. The locale is read
    /// from the store; an unreadable or unknown value falls back to English.
    pub fn new(client: ApiClient, store: Arc<dyn CredentialStore>, ui: Arc<dyn UiHost>) -> Self {
        let locale = match store.get(LOCALE_SLOT) {
            Ok(Some(code)) => code.parse::<Locale>().unwrap_or_else(|err| {
                warn!("ignoring persisted locale: {err}");
                Locale::default()
            }),
            Ok(None) => Locale::default(),
            Err(err) => {
                warn!("failed to read persisted locale: {err}");
                Locale::default()
            }
        };
        let session = Arc::new(Session::new(client.credentials().clone(), store));
        Self {
            client,
            session,
            ui,
            locale: RwLock::new(locale),
            last_server_message: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        *self.locale.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.locale())
    }

    fn requests(&self) -> SafeRequest<'_> {
        SafeRequest::new(&self.session, self.ui.as_ref(), self.catalog())
    }

    /// Switch the UI language and remember it for the next start.
    /// # Errors
    /// Returns an error if the choice cannot be persisted; the switch still
    /// applies to this run.
    pub fn set_locale(&self, locale: Locale) -> Result<(), StoreError> {
        *self.locale.write().unwrap_or_else(PoisonError::into_inner) = locale;
        self.session.store().set(LOCALE_SLOT, locale.code())
    }

    /// Restore the session from a persisted token. The probe bypasses the
    /// request wrapper: a stale token must not trigger a redirect or a toast.
    /// Any failed probe forgets the token.
    pub async fn start(&self) -> SessionState {
        let token = match self.session.persisted_token() {
            Ok(Some(token)) => token,
            Ok(None) => return self.session.state(),
            Err(err) => {
                warn!("failed to read persisted token: {err}");
                return self.session.state();
            }
        };

        self.session.adopt_token(token);
        match self.client.get_current_user().await {
            Ok(user) => {
                info!("session restored for user {}", user.id);
                if let Err(err) = self.session.sign_in(user, None) {
                    warn!("failed to persist session: {err}");
                }
            }
            Err(ApiError::Status(err)) => {
                debug!("persisted token rejected with {}", err.status);
                self.session.clear();
            }
            Err(err) => {
                warn!("session probe failed: {err}");
                self.session.clear();
            }
        }
        self.session.state()
    }

    pub async fn login(&self, email: &str, password: SecretString) -> Option<User> {
        let form = self.validated(forms::login(email, password))?;
        let response = self.requests().run(self.client.login(&form)).await?;
        Some(self.enter(response.user, response.token.access_token))
    }

    pub async fn signup(&self, input: SignupInput) -> Option<User> {
        let body = self.validated(forms::signup(input))?;
        let response = self.requests().run(self.client.create_user(&body)).await?;
        Some(self.enter(response.user, response.token.access_token))
    }

    pub fn logout(&self) {
        self.session.clear();
        self.ui.navigate(routes::LOGIN);
    }

    pub async fn recover_password(&self, email: &str) -> bool {
        let Some(email) = self.validated(forms::recover_password(email)) else {
            return false;
        };
        let sent = self
            .requests()
            .run(self.client.request_password_recovery(&email))
            .await
            .is_some();
        if sent {
            self.notify_key("auth.success.recovery_email", Severity::Info);
        }
        sent
    }

    pub async fn reset_password(
        &self,
        token: &str,
        password: SecretString,
        confirm: &SecretString,
    ) -> Option<User> {
        let body = self.validated(forms::reset_password(token, password, confirm))?;
        let user = self.requests().run(self.client.reset_password(&body)).await?;
        self.notify_key("auth.success.reset_password", Severity::Info);
        self.ui.navigate(routes::LOGIN);
        Some(user)
    }

    /// Send only the fields that changed; an unchanged form makes no request.
    pub async fn update_profile(&self, input: ProfileInput) -> Option<User> {
        let current = self.require_user()?;
        let update = self.validated(forms::edit_profile(&current, input))?;
        if update.is_empty() {
            return Some(current);
        }
        let user = self
            .requests()
            .run(self.client.update_user(current.id, &update))
            .await?;
        self.session.refresh_user(user.clone());
        self.notify_key("user.success.update", Severity::Info);
        Some(user)
    }

    pub async fn change_password(
        &self,
        password: SecretString,
        confirm: &SecretString,
    ) -> Option<User> {
        let current = self.require_user()?;
        let update = self.validated(forms::edit_password(password, confirm))?;
        let user = self
            .requests()
            .run(self.client.update_user(current.id, &update))
            .await?;
        self.session.refresh_user(user.clone());
        self.notify_key("user.success.update", Severity::Info);
        Some(user)
    }

    /// Update any user the caller may edit, by id.
    pub async fn update_user(&self, user_id: i64, input: ProfileInput) -> Option<User> {
        let target = self.requests().run(self.client.get_user(user_id)).await?;
        let update = self.validated(forms::edit_profile(&target, input))?;
        if update.is_empty() {
            return Some(target);
        }
        let user = self
            .requests()
            .run(self.client.update_user(user_id, &update))
            .await?;
        self.refresh_if_current(&user);
        self.notify_key("user.success.update", Severity::Info);
        Some(user)
    }

    /// Upload an avatar for `user_id`, or for the signed-in user.
    pub async fn upload_avatar(&self, user_id: Option<i64>, avatar: AvatarUpload) -> Option<User> {
        let user_id = match user_id {
            Some(id) => id,
            None => self.require_user()?.id,
        };
        let avatar = self.validated(forms::avatar(avatar))?;
        let user = self
            .requests()
            .run(self.client.set_user_avatar(user_id, &avatar))
            .await?;
        self.refresh_if_current(&user);
        self.notify_key("user.success.update", Severity::Info);
        Some(user)
    }

    pub async fn search_users(&self, params: &SearchUsers) -> Option<Vec<User>> {
        self.requests().run(self.client.search_users(params)).await
    }

    pub async fn get_user(&self, user_id: i64) -> Option<User> {
        self.requests().run(self.client.get_user(user_id)).await
    }

    /// Deleting the signed-in account also ends the session.
    pub async fn delete_user(&self, user_id: i64) -> bool {
        if self
            .requests()
            .run(self.client.delete_user(user_id))
            .await
            .is_none()
        {
            return false;
        }
        if self.current_user().is_some_and(|user| user.id == user_id) {
            self.logout();
        }
        true
    }

    /// Apply the route guard to `path` and navigate accordingly.
    pub fn visit(&self, path: &str) -> GuardDecision {
        let decision = routes::guard(path, self.session.is_authenticated());
        match decision {
            GuardDecision::Allow => self.ui.navigate(routes::normalize(path)),
            GuardDecision::Redirect(target) => self.ui.navigate(target),
            GuardDecision::SignOut => self.logout(),
        }
        decision
    }

    /// Show a flash message pushed with a server-rendered page. The same
    /// `(content, timestamp)` pair is shown once.
    pub fn show_server_message(&self, message: &ServerMessage) {
        {
            let mut last = self
                .last_server_message
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let key = (message.content.clone(), message.timestamp);
            if last.as_ref() == Some(&key) {
                return;
            }
            *last = Some(key);
        }
        let catalog = self.catalog();
        let text = catalog
            .server_message(&message.content)
            .unwrap_or(message.content.as_str());
        let severity = match message.kind {
            ServerMessageKind::Error => Severity::Error,
            ServerMessageKind::Default => Severity::Info,
        };
        self.ui.notify(text, severity);
    }

    fn enter(&self, user: User, token: SecretString) -> User {
        if let Err(err) = self.session.sign_in(user.clone(), Some(token)) {
            warn!("failed to persist access token: {err}");
        }
        let greeting = format!("{} {}", self.catalog().text("welcome"), user.display_name());
        self.ui.notify(&greeting, Severity::Info);
        self.ui.navigate(routes::APP);
        user
    }

    fn require_user(&self) -> Option<User> {
        let user = self.session.current_user();
        if user.is_none() {
            debug!("flow requires a signed-in user");
            self.ui.navigate(routes::LOGIN);
        }
        user
    }

    fn refresh_if_current(&self, user: &User) {
        if self.current_user().is_some_and(|current| current.id == user.id) {
            self.session.refresh_user(user.clone());
        }
    }

    fn validated<T>(&self, result: Result<T, FormErrors>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(errors) => {
                debug!("form rejected: {errors}");
                for message in errors.messages(&self.catalog()) {
                    self.ui.notify(&message, Severity::Error);
                }
                None
            }
        }
    }

    fn notify_key(&self, key: &str, severity: Severity) {
        self.ui.notify(&self.catalog().text(key), severity);
    }
}
