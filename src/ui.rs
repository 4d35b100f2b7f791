//! The two side-effect channels the client core may use on its host.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Error => "error",
        })
    }
}

/// Host UI. Implementations must not block: notify shows a toast (or prints),
/// navigate switches the visible page.
pub trait UiHost: Send + Sync {
    fn notify(&self, text: &str, severity: Severity);

    fn navigate(&self, path: &str);
}
