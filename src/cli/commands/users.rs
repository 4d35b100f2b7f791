use clap::{Arg, Command};

use super::auth::{ARG_EMAIL, ARG_USERNAME, name_args};

pub const CMD_USERS: &str = "users";
pub const CMD_SEARCH: &str = "search";
pub const CMD_GET: &str = "get";
pub const CMD_UPDATE: &str = "update";
pub const CMD_DELETE: &str = "delete";
pub const CMD_AVATAR: &str = "avatar";

pub const ARG_ID: &str = "id";
pub const ARG_QUERY: &str = "query";
pub const ARG_OFFSET: &str = "offset";
pub const ARG_PATH: &str = "path";
pub const ARG_USER: &str = "user";
pub const ARG_NEW_PASSWORD: &str = "password";

fn user_id() -> Arg {
    Arg::new(ARG_ID)
        .help("User id")
        .required(true)
        .value_parser(clap::value_parser!(i64))
}

#[must_use]
pub fn subcommands() -> Vec<Command> {
    vec![
        Command::new(CMD_USERS)
            .about("Manage users")
            .subcommand_required(true)
            .arg_required_else_help(true)
            .subcommand(
                Command::new(CMD_SEARCH)
                    .about("Search users")
                    .arg(Arg::new(ARG_QUERY).long(ARG_QUERY).help("Search text"))
                    .arg(
                        Arg::new(ARG_OFFSET)
                            .long(ARG_OFFSET)
                            .help("Number of results to skip")
                            .value_parser(clap::value_parser!(u32)),
                    ),
            )
            .subcommand(Command::new(CMD_GET).about("Show a user").arg(user_id()))
            .subcommand(
                name_args(
                    Command::new(CMD_UPDATE)
                        .about("Edit a user; only the given fields change")
                        .arg(user_id())
                        .arg(Arg::new(ARG_EMAIL).long(ARG_EMAIL).help("New email"))
                        .arg(
                            Arg::new(ARG_USERNAME)
                                .long(ARG_USERNAME)
                                .help("New username"),
                        ),
                )
                .arg(
                    Arg::new(ARG_NEW_PASSWORD)
                        .long(ARG_NEW_PASSWORD)
                        .help("New password (signed-in user only)")
                        .env("PORTAL_NEW_PASSWORD")
                        .hide_env_values(true),
                ),
            )
            .subcommand(Command::new(CMD_DELETE).about("Delete a user").arg(user_id())),
        Command::new(CMD_AVATAR)
            .about("Upload an avatar image (jpeg, png or webp, at most 5MB)")
            .arg(Arg::new(ARG_PATH).help("Image file").required(true))
            .arg(
                Arg::new(ARG_USER)
                    .long(ARG_USER)
                    .help("User id (default: signed-in user)")
                    .value_parser(clap::value_parser!(i64)),
            ),
    ]
}
