//! Single entry point for API calls triggered from the UI.
//!
//! Callers never see an [`ApiError`]: the wrapper turns each failure into the
//! side effect the user should see and hands back `None`.
//!
//! | failure                     | effect                                          |
//! |-----------------------------|-------------------------------------------------|
//! | `401`                       | session cleared, navigate to the login page     |
//! | `5xx`                       | generic error notification                      |
//! | other status with a known `message` code | notification with its text         |
//! | other status, unknown code  | generic error notification                      |
//! | no response (network, decode, request build) | generic error notification     |

use crate::{
    api::ApiError,
    i18n::Catalog,
    routes,
    session::Session,
    ui::{Severity, UiHost},
};
use std::future::Future;
use tracing::{debug, warn};

pub const UNAUTHORIZED_STATUS: u16 = 401;

#[derive(Clone, Copy)]
pub struct SafeRequest<'a> {
    session: &'a Session,
    ui: &'a dyn UiHost,
    catalog: Catalog,
}

impl<'a> SafeRequest<'a> {
    #[must_use]
    pub fn new(session: &'a Session, ui: &'a dyn UiHost, catalog: Catalog) -> Self {
        Self {
            session,
            ui,
            catalog,
        }
    }

    /// Await `call`; `Some` carries the success value unchanged.
    pub async fn run<T, F>(&self, call: F) -> Option<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        match call.await {
            Ok(value) => Some(value),
            Err(err) => {
                self.handle(&err);
                None
            }
        }
    }

    /// Apply the side effect for `err`.
    pub fn handle(&self, err: &ApiError) {
        let Some(normalized) = err.normalized() else {
            warn!("request failed without response: {err}");
            self.notify_generic();
            return;
        };

        if normalized.status == UNAUTHORIZED_STATUS {
            debug!("request unauthorized, clearing session");
            self.session.clear();
            self.ui.navigate(routes::LOGIN);
            return;
        }

        if normalized.is_server_error() {
            warn!("request failed with server error {}", normalized.status);
            self.notify_generic();
            return;
        }

        let text = normalized
            .message_code()
            .and_then(|code| self.catalog.server_message(code));
        match text {
            Some(text) => {
                debug!(
                    "request rejected with {}: {:?}",
                    normalized.status,
                    normalized.message_code()
                );
                self.ui.notify(text, Severity::Error);
            }
            None => {
                warn!(
                    "request rejected with {} and no known message code",
                    normalized.status
                );
                self.notify_generic();
            }
        }
    }

    fn notify_generic(&self) {
        self.ui
            .notify(&self.catalog.generic_error(), Severity::Error);
    }
}
