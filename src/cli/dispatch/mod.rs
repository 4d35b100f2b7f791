//! Map validated CLI matches to an [`Action`].

use crate::{
    api::models::SearchUsers,
    cli::{
        actions::{
            Action, Task,
            auth::{LoginArgs, ResetArgs, SignupArgs},
            users::{AvatarArgs, UpdateArgs},
        },
        commands::{
            self, CMD_LOCALE, CMD_OPEN,
            auth::{
                ARG_EMAIL, ARG_FIRST_NAME, ARG_LAST_NAME, ARG_PASSWORD, ARG_PASSWORD_CONFIRM,
                ARG_TOKEN, ARG_USERNAME, CMD_LOGIN, CMD_LOGOUT, CMD_RECOVER_PASSWORD,
                CMD_RESET_PASSWORD, CMD_SIGNUP, CMD_WHOAMI,
            },
            users::{
                ARG_ID, ARG_NEW_PASSWORD, ARG_OFFSET, ARG_PATH, ARG_QUERY, ARG_USER, CMD_AVATAR,
                CMD_DELETE, CMD_GET, CMD_SEARCH, CMD_UPDATE, CMD_USERS,
            },
        },
    },
    i18n::Locale,
};
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use secrecy::SecretString;
use std::path::PathBuf;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let config = commands::config::parse(matches)?;

    let (name, sub) = matches
        .subcommand()
        .context("missing subcommand, see --help")?;

    let task = match name {
        CMD_LOGIN => Task::Login(LoginArgs {
            email: required(sub, ARG_EMAIL)?,
            password: secret(sub, ARG_PASSWORD)?,
        }),
        CMD_LOGOUT => Task::Logout,
        CMD_WHOAMI => Task::Whoami,
        CMD_SIGNUP => {
            let password = secret(sub, ARG_PASSWORD)?;
            Task::Signup(SignupArgs {
                email: required(sub, ARG_EMAIL)?,
                username: required(sub, ARG_USERNAME)?,
                first_name: optional(sub, ARG_FIRST_NAME),
                last_name: optional(sub, ARG_LAST_NAME),
                password_confirm: confirmation(sub, &password),
                password,
            })
        }
        CMD_RECOVER_PASSWORD => Task::RecoverPassword {
            email: required(sub, ARG_EMAIL)?,
        },
        CMD_RESET_PASSWORD => {
            let password = secret(sub, ARG_PASSWORD)?;
            Task::ResetPassword(ResetArgs {
                token: required(sub, ARG_TOKEN)?,
                password_confirm: confirmation(sub, &password),
                password,
            })
        }
        CMD_USERS => users(sub)?,
        CMD_AVATAR => Task::Avatar(AvatarArgs {
            path: PathBuf::from(required(sub, ARG_PATH)?),
            user_id: sub.get_one::<i64>(ARG_USER).copied(),
        }),
        CMD_LOCALE => Task::Locale(
            required(sub, commands::ARG_LANGUAGE)?
                .parse::<Locale>()
                .map_err(|err| anyhow!(err))?,
        ),
        CMD_OPEN => Task::Open {
            path: required(sub, commands::ARG_ROUTE)?,
        },
        other => return Err(anyhow!("unknown subcommand: {other}")),
    };

    Ok(Action { config, task })
}

fn users(matches: &ArgMatches) -> Result<Task> {
    let (name, sub) = matches
        .subcommand()
        .context("missing users subcommand, see --help")?;
    let id = || {
        sub.get_one::<i64>(ARG_ID)
            .copied()
            .context("missing required argument: <id>")
    };

    Ok(match name {
        CMD_SEARCH => Task::SearchUsers(SearchUsers {
            query: optional(sub, ARG_QUERY),
            offset: sub.get_one::<u32>(ARG_OFFSET).copied(),
        }),
        CMD_GET => Task::GetUser { id: id()? },
        CMD_UPDATE => Task::UpdateUser(UpdateArgs {
            id: id()?,
            email: optional(sub, ARG_EMAIL),
            username: optional(sub, ARG_USERNAME),
            first_name: optional(sub, ARG_FIRST_NAME),
            last_name: optional(sub, ARG_LAST_NAME),
            password: optional(sub, ARG_NEW_PASSWORD).map(SecretString::from),
        }),
        CMD_DELETE => Task::DeleteUser { id: id()? },
        other => return Err(anyhow!("unknown users subcommand: {other}")),
    })
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))
}

fn optional(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.get_one::<String>(name).cloned()
}

fn secret(matches: &ArgMatches, name: &str) -> Result<SecretString> {
    required(matches, name).map(SecretString::from)
}

fn confirmation(matches: &ArgMatches, password: &SecretString) -> SecretString {
    optional(matches, ARG_PASSWORD_CONFIRM)
        .map_or_else(|| password.clone(), SecretString::from)
}
