//! Localized message catalogs.
//!
//! Each locale is a flat table of dotted keys sorted for binary search. Server
//! message codes (`user.conflict.email_already_registered`) live under the
//! `server.` prefix.

mod en;
mod fr;

use std::{borrow::Cow, fmt, str::FromStr};
use thiserror::Error;

/// Key of the generic failure text.
pub const GENERIC_ERROR_KEY: &str = "server.internal_server_error";

const SERVER_PREFIX: &str = "server.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::En, Self::Fr];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    fn entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::En => en::ENTRIES,
            Self::Fr => fr::ENTRIES,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported locale '{0}' (expected en or fr)")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    /// Accepts `en`, `FR`, `fr-CA`, `en_GB`; the region is ignored.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let language = value
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Ok(Self::En),
            "fr" => Ok(Self::Fr),
            _ => Err(UnknownLocale(value.trim().to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Catalog {
    locale: Locale,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl Catalog {
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Exact lookup in this locale only.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'static str> {
        lookup(self.locale.entries(), key)
    }

    /// Lookup with fallback to English, then to the key itself.
    #[must_use]
    pub fn text(&self, key: &str) -> Cow<'static, str> {
        self.get(key)
            .or_else(|| lookup(Locale::En.entries(), key))
            .map_or_else(|| Cow::Owned(key.to_string()), Cow::Borrowed)
    }

    /// [`Catalog::text`] with `{name}` placeholders replaced from `params`.
    /// Unknown placeholders are left as written.
    #[must_use]
    pub fn format(&self, key: &str, params: &[(&str, &str)]) -> String {
        let mut text = self.text(key).into_owned();
        for (name, value) in params {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }

    /// Text bound to a server message code. Tries `server.<code>` first, then
    /// any server key ending in `.<code>` so leaf codes resolve too.
    #[must_use]
    pub fn server_message(&self, code: &str) -> Option<&'static str> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        if let Some(text) = self.get(&format!("{SERVER_PREFIX}{code}")) {
            return Some(text);
        }
        let suffix = format!(".{code}");
        self.locale
            .entries()
            .iter()
            .find(|(key, _)| key.starts_with(SERVER_PREFIX) && key.ends_with(&suffix))
            .map(|(_, text)| *text)
    }

    #[must_use]
    pub fn generic_error(&self) -> Cow<'static, str> {
        self.text(GENERIC_ERROR_KEY)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.locale.entries().iter().map(|(key, _)| *key)
    }
}

fn lookup(entries: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    entries
        .binary_search_by(|(candidate, _)| (*candidate).cmp(key))
        .ok()
        .map(|index| entries[index].1)
}
