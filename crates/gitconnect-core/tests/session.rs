//! Integration tests for session gating, login and logout.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeApi, Harness, PASSWORD, octocat, wire_post};
use gitconnect_core::{FeedError, LocalStore, Registration, ValidationError};
use gitconnect_model::{PostId, ReactionKind, Session};
use tempfile::tempdir;

#[tokio::test(start_paused = true)]
async fn test_changes_seen_within_one_interval() {
    let harness = Harness::new(FakeApi::default(), Session::anonymous());
    let gate = Arc::clone(harness.client.gate());
    let interval = gate.poll_interval();
    let poller = gate.spawn_polling();
    let mut changes = gate.subscribe();

    // Let the first immediate tick run.
    tokio::time::sleep(Duration::from_millis(1)).await;
    harness.source.set(octocat());
    assert!(!gate.is_authenticated());

    tokio::time::sleep(interval).await;
    assert!(gate.is_authenticated());
    assert!(changes.has_changed().unwrap());
    assert_eq!(changes.borrow_and_update().display_name, "octocat");

    harness.source.set(Session::anonymous());
    tokio::time::sleep(interval).await;
    assert!(!gate.is_authenticated());

    poller.abort();
}

#[tokio::test]
async fn test_stale_session_still_gates() {
    let harness = Harness::new(
        FakeApi::with_posts(vec![wire_post(1, 10, 0, 0)]),
        Session::anonymous(),
    );
    harness.client.feed().load().await.unwrap();

    // Logged in elsewhere, but not yet polled.
    harness.source.set(octocat());
    let err = harness
        .client
        .reactions()
        .react(&PostId::from(1), ReactionKind::Like)
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::Unauthenticated));
    assert_eq!(harness.api.calls("like"), 0);

    assert!(harness.client.gate().refresh());
    harness.api.reply(Some(1), Some(0));
    harness
        .client
        .reactions()
        .react(&PostId::from(1), ReactionKind::Like)
        .await
        .unwrap();
    assert_eq!(harness.api.calls("like"), 1);
}

#[tokio::test]
async fn test_login_and_logout_with_local_store() {
    let dir = tempdir().unwrap();
    let store = Arc::new(LocalStore::at(dir.path().join("state.toml")));
    let harness = Harness::new(FakeApi::default(), Session::anonymous());
    let client = gitconnect_core::FeedClient::new(
        Arc::clone(&harness.api),
        store.clone(),
        &gitconnect_core::ClientConfig::default(),
    );
    let auth = client.auth(store.clone());

    let session = auth.login("octo@example.com", PASSWORD).await.unwrap();
    assert_eq!(session.display_name, "octocat");
    assert!(client.gate().is_authenticated());
    assert_eq!(store.load().unwrap().session.user_id.as_deref(), Some("7"));

    auth.logout().unwrap();
    assert!(!client.gate().is_authenticated());
    assert!(store.load().unwrap().session.token.is_none());
}

#[tokio::test]
async fn test_rejected_login_keeps_session() {
    let harness = Harness::new(FakeApi::default(), Session::anonymous());
    let auth = harness.client.auth(harness.source.clone());

    let err = auth.login("octo@example.com", "wrong").await.unwrap_err();

    assert!(matches!(err, FeedError::LoginFailed(_)));
    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(!harness.client.gate().is_authenticated());
}

#[tokio::test]
async fn test_register_validates_before_calling() {
    let harness = Harness::new(FakeApi::default(), Session::anonymous());
    let auth = harness.client.auth(harness.source.clone());
    let mut registration = Registration {
        username: "octocat".to_string(),
        email: "octo@example.com".to_string(),
        password: "one".to_string(),
        confirm_password: "two".to_string(),
    };

    let err = auth.register(&registration).await.unwrap_err();
    assert!(matches!(
        err,
        FeedError::ValidationFailed(ValidationError::PasswordMismatch)
    ));
    assert_eq!(harness.api.calls("register"), 0);

    registration.confirm_password = "one".to_string();
    auth.register(&registration).await.unwrap();
    assert_eq!(harness.api.calls("register"), 1);
    // Registering does not log in.
    assert!(!harness.client.gate().is_authenticated());
}
