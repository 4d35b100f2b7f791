//! Resolved client configuration. Values come from flags or environment
//! (see `cli::commands`); this module only validates and fills defaults.
//! Configuration values are not secret; the access token lives in the
//! credential store.

use crate::i18n::{Locale, UnknownLocale};
use std::{path::PathBuf, time::Duration};
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const STATE_DIR_NAME: &str = "userportal";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },
    #[error(transparent)]
    Locale(#[from] UnknownLocale),
    #[error("timeout must be a positive number of seconds")]
    Timeout,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: Url,
    pub state_dir: PathBuf,
    /// Locale forced for this run; `None` uses the persisted choice.
    pub locale: Option<Locale>,
    pub timeout: Duration,
}

impl AppConfig {
    /// Build from raw values; blank values fall back to defaults.
    /// # Errors
    /// Returns an error for a malformed URL, unknown locale or zero timeout.
    pub fn from_values(
        api_url: Option<&str>,
        state_dir: Option<&str>,
        locale: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let api_base_url = parse_api_url(
            &api_url
                .and_then(normalize_value)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;
        let state_dir = state_dir
            .and_then(normalize_value)
            .map_or_else(default_state_dir, PathBuf::from);
        let locale = locale
            .and_then(normalize_value)
            .map(|value| value.parse::<Locale>())
            .transpose()?;
        let timeout = match timeout_secs {
            Some(0) => return Err(ConfigError::Timeout),
            Some(secs) => Duration::from_secs(secs),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        Ok(Self {
            api_base_url,
            state_dir,
            locale,
            timeout,
        })
    }
}

/// Only absolute `http`/`https` URLs without query or fragment are accepted.
/// # Errors
/// Returns an error when the value is not such a URL.
pub fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: &str| ConfigError::ApiUrl {
        value: value.to_string(),
        reason: reason.to_string(),
    };
    let url = Url::parse(value.trim()).map_err(|err| invalid(&err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed"));
    }
    Ok(url)
}

/// `userportal` under the platform config directory (`$XDG_CONFIG_HOME` or
/// `~/.config` on Linux), else `./.userportal`.
#[must_use]
pub fn default_state_dir() -> PathBuf {
    dirs::config_dir().map_or_else(
        || PathBuf::from(format!(".{STATE_DIR_NAME}")),
        |dir| dir.join(STATE_DIR_NAME),
    )
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn normalize_value_trims_and_rejects_empty() {
        assert_eq!(normalize_value(""), None);
        assert_eq!(normalize_value("   "), None);
        assert_eq!(
            normalize_value("  http://api.local "),
            Some("http://api.local".to_string())
        );
    }

    #[test]
    fn from_values_uses_defaults_for_blank_input() -> Result<()> {
        let config = AppConfig::from_values(Some(" "), None, Some(""), None)?;
        assert_eq!(config.api_base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.locale, None);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Ok(())
    }

    #[test]
    fn from_values_overrides() -> Result<()> {
        let config = AppConfig::from_values(
            Some("https://portal.example.com/backend/"),
            Some("/tmp/portal-state"),
            Some("fr-FR"),
            Some(5),
        )?;
        assert_eq!(
            config.api_base_url.as_str(),
            "https://portal.example.com/backend/"
        );
        assert_eq!(config.state_dir, PathBuf::from("/tmp/portal-state"));
        assert_eq!(config.locale, Some(Locale::Fr));
        assert_eq!(config.timeout, Duration::from_secs(5));
        Ok(())
    }

    #[test]
    fn from_values_rejects_bad_input() {
        assert!(matches!(
            AppConfig::from_values(Some("ftp://example.com"), None, None, None),
            Err(ConfigError::ApiUrl { .. })
        ));
        assert!(matches!(
            AppConfig::from_values(None, None, Some("de"), None),
            Err(ConfigError::Locale(_))
        ));
        assert_eq!(
            AppConfig::from_values(None, None, None, Some(0)),
            Err(ConfigError::Timeout)
        );
    }

    #[test]
    fn parse_api_url_rejects_query() {
        assert!(parse_api_url("http://api.local/?x=1").is_err());
        assert!(parse_api_url("mailto:ada@example.com").is_err());
        assert!(parse_api_url("http://api.local").is_ok());
    }

    #[test]
    fn default_state_dir_is_named_after_the_app() {
        let dir = default_state_dir();
        assert!(dir.ends_with(STATE_DIR_NAME) || dir == PathBuf::from(".userportal"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn default_state_dir_prefers_xdg() {
        temp_env::with_vars(
            [
                ("XDG_CONFIG_HOME", Some("/xdg")),
                ("HOME", Some("/home/ada")),
            ],
            || assert_eq!(default_state_dir(), PathBuf::from("/xdg/userportal")),
        );
        temp_env::with_vars(
            [("XDG_CONFIG_HOME", None), ("HOME", Some("/home/ada"))],
            || {
                assert_eq!(
                    default_state_dir(),
                    PathBuf::from("/home/ada/.config/userportal")
                );
            },
        );
    }

    #[test]
    fn blank_state_dir_uses_default() -> Result<()> {
        let config = AppConfig::from_values(None, Some("  "), None, None)?;
        assert_eq!(config.state_dir, default_state_dir());
        Ok(())
    }
}
