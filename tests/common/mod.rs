#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use serde_json::{Value, json};
use std::{
    net::TcpListener,
    sync::{Arc, Mutex},
};
use url::Url;
use userportal::{
    api::{ApiClient, HttpTransport},
    app::App,
    session::{CredentialStore, MemoryStore},
    ui::{Severity, UiHost},
};
use wiremock::MockServer;

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Notify(String, Severity),
    Navigate(String),
}

/// Host that records every side effect for later assertions.
#[derive(Debug, Default)]
pub struct RecordingUi {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingUi {
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<(String, Severity)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::Notify(text, severity) => Some((text, severity)),
                UiEvent::Navigate(_) => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::Navigate(path) => Some(path),
                UiEvent::Notify(..) => None,
            })
            .collect()
    }
}

impl UiHost for RecordingUi {
    fn notify(&self, text: &str, severity: Severity) {
        self.events
            .lock()
            .unwrap()
            .push(UiEvent::Notify(text.to_string(), severity));
    }

    fn navigate(&self, path: &str) {
        self.events
            .lock()
            .unwrap()
            .push(UiEvent::Navigate(path.to_string()));
    }
}

pub fn user_json(id: i64) -> Value {
    json!({
        "id": id,
        "email": format!("user{id}@example.com"),
        "username": format!("user{id}"),
        "first_name": null,
        "last_name": null,
        "is_active": true,
        "avatar_url": null
    })
}

pub fn user_and_token_json(id: i64, token: &str) -> Value {
    json!({
        "user": user_json(id),
        "token": {"access_token": token, "token_type": "bearer"}
    })
}

pub fn validation_error_json() -> Value {
    json!({"detail": [
        {"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"},
        {"loc": ["body", "password"], "msg": "field required", "type": "missing"}
    ]})
}

pub fn client(server: &MockServer) -> ApiClient {
    let transport = HttpTransport::new("userportal-tests").unwrap();
    ApiClient::new(Url::parse(&server.uri()).unwrap(), Arc::new(transport))
}

pub struct Harness {
    pub app: App,
    pub ui: Arc<RecordingUi>,
    pub store: Arc<MemoryStore>,
}

pub fn harness(server: &MockServer) -> Harness {
    harness_with_store(server, Arc::new(MemoryStore::new()))
}

pub fn harness_with_store(server: &MockServer, store: Arc<MemoryStore>) -> Harness {
    let ui = Arc::new(RecordingUi::default());
    let app = App::new(
        client(server),
        store.clone() as Arc<dyn CredentialStore>,
        ui.clone(),
    );
    Harness { app, ui, store }
}
