use crate::{
    api::models::{AvatarUpload, SearchUsers},
    app::App,
    forms::ProfileInput,
};
use anyhow::{Context, Result, bail};
use secrecy::SecretString;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug)]
pub struct UpdateArgs {
    pub id: i64,
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<SecretString>,
}

#[derive(Debug)]
pub struct AvatarArgs {
    pub path: PathBuf,
    pub user_id: Option<i64>,
}

pub(super) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// # Errors
/// Returns an error if the search failed.
pub async fn search(app: &App, params: &SearchUsers) -> Result<()> {
    app.start().await;
    let Some(users) = app.search_users(params).await else {
        bail!("user search failed");
    };
    print_json(&users)
}

/// # Errors
/// Returns an error if the user could not be fetched.
pub async fn get(app: &App, id: i64) -> Result<()> {
    app.start().await;
    let Some(user) = app.get_user(id).await else {
        bail!("failed to fetch user {id}");
    };
    print_json(&user)
}

/// Profile fields go through the profile form; a new password is only
/// accepted for the signed-in user.
/// # Errors
/// Returns an error if the update was rejected.
pub async fn update(app: &App, args: UpdateArgs) -> Result<()> {
    app.start().await;
    let is_self = app.current_user().is_some_and(|user| user.id == args.id);

    if let Some(password) = args.password {
        if !is_self {
            bail!("the password can only be changed for the signed-in user");
        }
        let confirm = password.clone();
        if app.change_password(password, &confirm).await.is_none() {
            bail!("password change failed");
        }
    }

    let input = ProfileInput {
        email: args.email,
        username: args.username,
        first_name: args.first_name,
        last_name: args.last_name,
    };
    let user = if is_self {
        app.update_profile(input).await
    } else {
        app.update_user(args.id, input).await
    };
    let Some(user) = user else {
        bail!("failed to update user {}", args.id);
    };
    print_json(&user)
}

/// # Errors
/// Returns an error if the user was not deleted.
pub async fn delete(app: &App, id: i64) -> Result<()> {
    app.start().await;
    if !app.delete_user(id).await {
        bail!("failed to delete user {id}");
    }
    Ok(())
}

/// # Errors
/// Returns an error if the file cannot be read or the upload was rejected.
pub async fn avatar(app: &App, args: AvatarArgs) -> Result<()> {
    let upload = AvatarUpload::from_path(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    app.start().await;
    let Some(user) = app.upload_avatar(args.user_id, upload).await else {
        bail!("avatar upload failed");
    };
    print_json(&user)
}
