//! Terminal host: notifications and navigation are printed on stderr, so
//! stdout only carries command output.

use crate::ui::{Severity, UiHost};
use std::io::Write;

#[derive(Debug, Default)]
pub struct TerminalUi;

impl TerminalUi {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn render_notification(text: &str, severity: Severity) -> String {
    match severity {
        Severity::Info => text.to_string(),
        Severity::Error => format!("error: {text}"),
    }
}

fn render_navigation(path: &str) -> String {
    format!("-> {path}")
}

impl UiHost for TerminalUi {
    fn notify(&self, text: &str, severity: Severity) {
        let _ = writeln!(std::io::stderr().lock(), "{}", render_notification(text, severity));
    }

    fn navigate(&self, path: &str) {
        let _ = writeln!(std::io::stderr().lock(), "{}", render_navigation(path));
    }
}
