//! Relay → store → headers, with the session persisted on disk between runs.

use std::sync::Arc;

use aud_auth::headers::{AUTHORIZATION, USER_ID};
use aud_auth::{
    AllowedOrigins, AuthHeaderBuilder, BodyKind, CredentialRelay, CredentialStore, DetachedHost,
    FallbackIdentity, FileSessionStorage, InboundMessage, RelayOutcome,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn relay_at(path: &std::path::Path) -> CredentialRelay {
    let store = Arc::new(CredentialStore::new(Arc::new(FileSessionStorage::new(path))));
    CredentialRelay::new(
        store,
        AllowedOrigins::new(["http://localhost:5173"]),
        Arc::new(DetachedHost),
    )
}

#[test]
fn credentials_survive_restart_and_drive_headers() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let path = tmp.path().join("session.json");

    let first = relay_at(&path);
    first.initialize();
    let outcome = first.handle_message(&InboundMessage::new(
        "http://localhost:5173",
        json!({
            "type": "AUTH_CREDENTIALS",
            "token": "jwt-abc",
            "userId": "user-3",
            "timestamp": 1_710_000_000_000_i64
        }),
    ));
    assert_eq!(outcome, RelayOutcome::Stored);

    let second = relay_at(&path);
    assert!(second.store().get().is_none());
    second.initialize();
    let restored = second.store().get().expect("restored");
    assert_eq!(restored.user_id(), "user-3");
    assert_eq!(restored.timestamp(), 1_710_000_000_000);

    let headers = AuthHeaderBuilder::new(second.store().clone(), FallbackIdentity::new("static", "static-user"))
        .build_headers(BodyKind::Json);
    assert_eq!(headers.get(AUTHORIZATION).map(String::as_str), Some("Bearer jwt-abc"));
    assert_eq!(headers.get(USER_ID).map(String::as_str), Some("user-3"));
}

#[test]
fn corrupted_session_file_restores_as_absent() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let path = tmp.path().join("session.json");
    std::fs::write(&path, "{not json").expect("write");

    let relay = relay_at(&path);
    relay.initialize();

    assert!(relay.store().get().is_none());
    assert!(!path.exists(), "malformed session file removed");
}

#[test]
fn untrusted_origin_leaves_disk_untouched() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let path = tmp.path().join("session.json");

    let relay = relay_at(&path);
    let outcome = relay.handle_message(&InboundMessage::new(
        "https://phishing.example",
        json!({"type": "AUTH_CREDENTIALS", "token": "stolen", "userId": "victim"}),
    ));

    assert_eq!(outcome, RelayOutcome::Rejected);
    assert!(!path.exists());
}
