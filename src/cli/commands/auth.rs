use clap::{Arg, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_WHOAMI: &str = "whoami";
pub const CMD_SIGNUP: &str = "signup";
pub const CMD_RECOVER_PASSWORD: &str = "recover-password";
pub const CMD_RESET_PASSWORD: &str = "reset-password";

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_PASSWORD_CONFIRM: &str = "password-confirm";
pub const ARG_USERNAME: &str = "username";
pub const ARG_FIRST_NAME: &str = "first-name";
pub const ARG_LAST_NAME: &str = "last-name";
pub const ARG_TOKEN: &str = "token";

fn email() -> Arg {
    Arg::new(ARG_EMAIL)
        .long(ARG_EMAIL)
        .help("Account email")
        .required(true)
}

fn password() -> Arg {
    Arg::new(ARG_PASSWORD)
        .long(ARG_PASSWORD)
        .help("Password")
        .env("PORTAL_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

/// Confirmation defaults to the password itself when omitted.
fn password_confirm() -> Arg {
    Arg::new(ARG_PASSWORD_CONFIRM)
        .long(ARG_PASSWORD_CONFIRM)
        .help("Repeat the password (default: same as --password)")
}

pub(super) fn name_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_FIRST_NAME)
                .long(ARG_FIRST_NAME)
                .help("First name"),
        )
        .arg(Arg::new(ARG_LAST_NAME).long(ARG_LAST_NAME).help("Last name"))
}

#[must_use]
pub fn subcommands() -> Vec<Command> {
    vec![
        Command::new(CMD_LOGIN)
            .about("Log in and save the session")
            .arg(email())
            .arg(password()),
        Command::new(CMD_LOGOUT).about("Forget the saved session"),
        Command::new(CMD_WHOAMI).about("Show the signed-in user"),
        name_args(
            Command::new(CMD_SIGNUP)
                .about("Create an account and log in")
                .arg(email())
                .arg(
                    Arg::new(ARG_USERNAME)
                        .long(ARG_USERNAME)
                        .help("Username")
                        .required(true),
                ),
        )
        .arg(password())
        .arg(password_confirm()),
        Command::new(CMD_RECOVER_PASSWORD)
            .about("Send a password recovery email")
            .arg(email()),
        Command::new(CMD_RESET_PASSWORD)
            .about("Set a new password using a recovery token")
            .arg(
                Arg::new(ARG_TOKEN)
                    .long(ARG_TOKEN)
                    .help("Token from the recovery email")
                    .required(true),
            )
            .arg(password())
            .arg(password_confirm()),
    ]
}
