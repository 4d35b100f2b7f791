use crate::config::{AppConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use anyhow::Result;
use clap::{Arg, ArgMatches, Command};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_STATE_DIR: &str = "state-dir";
pub const ARG_LOCALE: &str = "locale";
pub const ARG_TIMEOUT: &str = "timeout";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Backend base URL")
                .default_value(DEFAULT_API_URL)
                .env("PORTAL_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_STATE_DIR)
                .long(ARG_STATE_DIR)
                .help("Saved session directory (default: <user config dir>/userportal)")
                .env("PORTAL_STATE_DIR")
                .global(true),
        )
        .arg(
            Arg::new(ARG_LOCALE)
                .long(ARG_LOCALE)
                .help("Message language: en or fr (saved for later runs)")
                .env("PORTAL_LOCALE")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .default_value("30")
                .env("PORTAL_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

/// Resolve the global options into an [`AppConfig`].
///
/// # Errors
/// Returns an error if a value is present but invalid.
pub fn parse(matches: &ArgMatches) -> Result<AppConfig> {
    Ok(AppConfig::from_values(
        matches.get_one::<String>(ARG_API_URL).map(String::as_str),
        matches.get_one::<String>(ARG_STATE_DIR).map(String::as_str),
        matches.get_one::<String>(ARG_LOCALE).map(String::as_str),
        Some(
            matches
                .get_one::<u64>(ARG_TIMEOUT)
                .copied()
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
    )?)
}
