pub mod auth;
pub mod config;
pub mod logging;
pub mod users;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const CMD_LOCALE: &str = "locale";
pub const CMD_OPEN: &str = "open";

pub const ARG_LANGUAGE: &str = "language";
pub const ARG_ROUTE: &str = "route";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("portal")
        .about("User portal client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommands(auth::subcommands())
        .subcommands(users::subcommands())
        .subcommand(
            Command::new(CMD_LOCALE)
                .about("Choose the message language")
                .arg(
                    Arg::new(ARG_LANGUAGE)
                        .help("Language code")
                        .required(true)
                        .value_parser(["en", "fr"]),
                ),
        )
        .subcommand(
            Command::new(CMD_OPEN)
                .about("Check where a page path leads for the current session")
                .arg(Arg::new(ARG_ROUTE).help("Page path, e.g. /app").required(true)),
        );

    let command = config::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "portal");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("User portal client".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() -> Result<()> {
        temp_env::with_vars(
            [
                ("PORTAL_API_URL", None::<&str>),
                ("PORTAL_TIMEOUT", None),
                ("PORTAL_LOCALE", None),
            ],
            || -> Result<()> {
                let matches = new().try_get_matches_from(["portal", "whoami"])?;
                assert_eq!(
                    matches.get_one::<String>(config::ARG_API_URL).cloned(),
                    Some("http://localhost:8000".to_string())
                );
                assert_eq!(matches.get_one::<u64>(config::ARG_TIMEOUT).copied(), Some(30));
                assert!(matches.get_one::<String>(config::ARG_LOCALE).is_none());
                assert_eq!(matches.subcommand_name(), Some(auth::CMD_WHOAMI));
                Ok(())
            },
        )
    }

    #[test]
    fn test_login_args() -> Result<()> {
        temp_env::with_vars([("PORTAL_PASSWORD", None::<&str>)], || -> Result<()> {
            let matches = new().try_get_matches_from([
                "portal",
                "login",
                "--email",
                "ada@example.com",
                "--password",
                "S3cret!pass",
            ])?;
            let (name, sub) = matches
                .subcommand()
                .ok_or_else(|| anyhow!("missing subcommand"))?;
            assert_eq!(name, auth::CMD_LOGIN);
            assert_eq!(
                sub.get_one::<String>(auth::ARG_EMAIL).cloned(),
                Some("ada@example.com".to_string())
            );
            assert_eq!(
                sub.get_one::<String>(auth::ARG_PASSWORD).cloned(),
                Some("S3cret!pass".to_string())
            );

            assert!(
                new()
                    .try_get_matches_from(["portal", "login", "--email", "ada@example.com"])
                    .is_err()
            );
            Ok(())
        })
    }

    #[test]
    fn test_check_env() -> Result<()> {
        temp_env::with_vars(
            [
                ("PORTAL_API_URL", Some("https://portal.example.com")),
                ("PORTAL_STATE_DIR", Some("/tmp/portal")),
                ("PORTAL_LOCALE", Some("fr")),
                ("PORTAL_TIMEOUT", Some("5")),
                ("PORTAL_LOG_LEVEL", Some("info")),
            ],
            || -> Result<()> {
                let matches = new().try_get_matches_from(["portal", "logout"])?;
                let config = config::parse(&matches)?;
                assert_eq!(config.api_base_url.as_str(), "https://portal.example.com/");
                assert_eq!(config.state_dir, std::path::PathBuf::from("/tmp/portal"));
                assert_eq!(config.locale, Some(crate::i18n::Locale::Fr));
                assert_eq!(config.timeout, std::time::Duration::from_secs(5));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
                Ok(())
            },
        )
    }

    #[test]
    fn test_rejects_zero_timeout() {
        temp_env::with_vars([("PORTAL_TIMEOUT", None::<&str>)], || {
            assert!(
                new()
                    .try_get_matches_from(["portal", "--timeout", "0", "whoami"])
                    .is_err()
            );
        });
    }

    #[test]
    fn test_users_subcommands() -> Result<()> {
        let matches =
            new().try_get_matches_from(["portal", "users", "update", "7", "--first-name", "Ada"])?;
        let users = matches
            .subcommand_matches(users::CMD_USERS)
            .ok_or_else(|| anyhow!("missing users"))?;
        let update = users
            .subcommand_matches(users::CMD_UPDATE)
            .ok_or_else(|| anyhow!("missing update"))?;
        assert_eq!(update.get_one::<i64>(users::ARG_ID).copied(), Some(7));
        assert_eq!(
            update.get_one::<String>(auth::ARG_FIRST_NAME).cloned(),
            Some("Ada".to_string())
        );

        assert!(new().try_get_matches_from(["portal", "users", "get", "abc"]).is_err());
        assert!(new().try_get_matches_from(["portal", "locale", "de"]).is_err());
        Ok(())
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("PORTAL_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(["portal", "whoami"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_usize {
            temp_env::with_vars([("PORTAL_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["portal".to_string(), "whoami".to_string()];
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }
}
