use crate::{
    APP_USER_AGENT,
    api::ApiClient,
    app::App,
    cli::actions::{Action, Task, auth, session, terminal::TerminalUi, users},
    session::FileStore,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    let Action { config, task } = action;
    debug!(
        "api: {}, state: {}",
        config.api_base_url,
        config.state_dir.display()
    );

    let client = ApiClient::http(config.api_base_url.clone(), APP_USER_AGENT, config.timeout)
        .context("failed to build API client")?;
    let store = Arc::new(FileStore::new(&config.state_dir));
    let app = App::new(client, store, Arc::new(TerminalUi::new()));

    if let Some(locale) = config.locale {
        app.set_locale(locale)
            .context("failed to save the locale")?;
    }

    match task {
        Task::Login(args) => auth::login(&app, args).await,
        Task::Logout => session::logout(&app).await,
        Task::Whoami => session::whoami(&app).await,
        Task::Signup(args) => auth::signup(&app, args).await,
        Task::RecoverPassword { email } => auth::recover_password(&app, &email).await,
        Task::ResetPassword(args) => auth::reset_password(&app, args).await,
        Task::SearchUsers(params) => users::search(&app, &params).await,
        Task::GetUser { id } => users::get(&app, id).await,
        Task::UpdateUser(args) => users::update(&app, args).await,
        Task::DeleteUser { id } => users::delete(&app, id).await,
        Task::Avatar(args) => users::avatar(&app, args).await,
        Task::Locale(locale) => session::locale(&app, locale),
        Task::Open { path } => session::open(&app, &path).await,
    }
}
