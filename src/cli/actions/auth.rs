use crate::{app::App, cli::actions::users::print_json, forms::SignupInput};
use anyhow::{Result, bail};
use secrecy::SecretString;

#[derive(Debug)]
pub struct LoginArgs {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct SignupArgs {
    pub email: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: SecretString,
    pub password_confirm: SecretString,
}

#[derive(Debug)]
pub struct ResetArgs {
    pub token: String,
    pub password: SecretString,
    pub password_confirm: SecretString,
}

/// # Errors
/// Returns an error if the login was rejected.
pub async fn login(app: &App, args: LoginArgs) -> Result<()> {
    let Some(user) = app.login(&args.email, args.password).await else {
        bail!("login failed");
    };
    print_json(&user)
}

/// # Errors
/// Returns an error if the account could not be created.
pub async fn signup(app: &App, args: SignupArgs) -> Result<()> {
    let input = SignupInput {
        email: args.email,
        username: args.username,
        first_name: args.first_name,
        last_name: args.last_name,
        password: args.password,
        password_confirm: args.password_confirm,
    };
    let Some(user) = app.signup(input).await else {
        bail!("signup failed");
    };
    print_json(&user)
}

/// # Errors
/// Returns an error if the recovery email was not sent.
pub async fn recover_password(app: &App, email: &str) -> Result<()> {
    if !app.recover_password(email).await {
        bail!("password recovery failed");
    }
    Ok(())
}

/// # Errors
/// Returns an error if the password was not reset.
pub async fn reset_password(app: &App, args: ResetArgs) -> Result<()> {
    if app
        .reset_password(&args.token, args.password, &args.password_confirm)
        .await
        .is_none()
    {
        bail!("password reset failed");
    }
    Ok(())
}
