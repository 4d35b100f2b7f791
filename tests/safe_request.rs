#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use anyhow::Result;
use common::{UiEvent, can_bind_localhost, harness, user_json};
use secrecy::SecretString;
use serde_json::json;
use std::{net::TcpListener, sync::Arc};
use url::Url;
use userportal::{
    api::{ApiClient, HttpTransport},
    app::App,
    i18n::{Catalog, Locale},
    routes,
    safe_request::SafeRequest,
    session::{ACCESS_TOKEN_SLOT, CredentialStore, MemoryStore},
    ui::Severity,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const GENERIC: &str = "Internal server error";

async fn respond(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/users/7"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn unauthorized_clears_session_and_redirects_once() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    respond(&server, 401, json!({"detail": "Could not validate credentials"})).await;
    let h = harness(&server);
    h.app.session().sign_in(
        serde_json::from_value(user_json(1))?,
        Some(SecretString::from("tok-1".to_string())),
    )?;
    let mut updates = h.app.session().subscribe();

    assert!(h.app.get_user(7).await.is_none());

    assert!(!h.app.session().is_authenticated());
    assert!(!h.app.client().credentials().is_set());
    assert_eq!(h.store.get(ACCESS_TOKEN_SLOT)?, None);
    assert!(updates.has_changed()?);
    assert!(!updates.borrow_and_update().is_authenticated());
    assert_eq!(
        h.ui.events(),
        vec![UiEvent::Navigate(routes::LOGIN.to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn server_errors_show_generic_text_whatever_the_body() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    respond(
        &server,
        500,
        json!({"message": "user.conflict.email_already_registered"}),
    )
    .await;
    let h = harness(&server);

    assert!(h.app.get_user(7).await.is_none());
    assert_eq!(
        h.ui.notifications(),
        vec![(GENERIC.to_string(), Severity::Error)]
    );
    assert!(h.ui.navigations().is_empty());
    Ok(())
}

#[tokio::test]
async fn known_message_code_is_translated() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    respond(&server, 409, json!({"message": "email_already_registered"})).await;
    let h = harness(&server);

    assert!(h.app.get_user(7).await.is_none());
    assert_eq!(
        h.ui.notifications(),
        vec![("Email already registered".to_string(), Severity::Error)]
    );

    h.app.set_locale(Locale::Fr)?;
    assert!(h.app.get_user(7).await.is_none());
    assert_eq!(
        h.ui.notifications()[1],
        ("Email déjà enregistré".to_string(), Severity::Error)
    );
    Ok(())
}

#[tokio::test]
async fn unknown_or_missing_code_falls_back_to_generic_text() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/7"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "user.not_found.x"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/8"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;
    let h = harness(&server);

    assert!(h.app.get_user(7).await.is_none());
    assert!(h.app.get_user(8).await.is_none());
    assert_eq!(
        h.ui.notifications(),
        vec![
            (GENERIC.to_string(), Severity::Error),
            (GENERIC.to_string(), Severity::Error)
        ]
    );
    Ok(())
}

#[tokio::test]
async fn network_failure_shows_generic_text() -> Result<()> {
    // Reserve a port, then release it so nothing listens there.
    let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
    let base = Url::parse(&format!("http://127.0.0.1:{port}"))?;
    let client = ApiClient::new(base, Arc::new(HttpTransport::new("userportal-tests")?));
    let ui = Arc::new(common::RecordingUi::default());
    let app = App::new(
        client,
        Arc::new(MemoryStore::new()) as Arc<dyn CredentialStore>,
        ui.clone(),
    );

    assert!(app.get_user(7).await.is_none());
    assert_eq!(
        ui.notifications(),
        vec![(GENERIC.to_string(), Severity::Error)]
    );
    assert!(ui.navigations().is_empty());
    Ok(())
}

#[tokio::test]
async fn success_passes_value_through_untouched() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    respond(&server, 200, user_json(7)).await;
    let h = harness(&server);
    let wrapper = SafeRequest::new(h.app.session(), h.ui.as_ref(), Catalog::new(Locale::En));

    let user = wrapper.run(h.app.client().get_user(7)).await;

    assert_eq!(user.map(|user| user.id), Some(7));
    assert!(h.ui.events().is_empty());
    Ok(())
}
