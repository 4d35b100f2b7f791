pub mod auth;
pub mod session;
pub mod terminal;
pub mod users;

// Internal "interpreter" for `Action`.
mod run;

use crate::{api::models::SearchUsers, config::AppConfig, i18n::Locale};

#[derive(Debug)]
pub struct Action {
    pub config: AppConfig,
    pub task: Task,
}

#[derive(Debug)]
pub enum Task {
    Login(auth::LoginArgs),
    Logout,
    Whoami,
    Signup(auth::SignupArgs),
    RecoverPassword { email: String },
    ResetPassword(auth::ResetArgs),
    SearchUsers(SearchUsers),
    GetUser { id: i64 },
    UpdateUser(users::UpdateArgs),
    DeleteUser { id: i64 },
    Avatar(users::AvatarArgs),
    Locale(Locale),
    Open { path: String },
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
