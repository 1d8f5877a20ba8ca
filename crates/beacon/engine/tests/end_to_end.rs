//! End-to-end tests over the SQLite store, the resolver, and the dispatcher.

use std::collections::HashSet;
use std::sync::Mutex;

use beacon_core::{
    AudienceSelector, DeliveryError, DispatchError, DispatchOutcome, Notification,
};
use beacon_engine::PushService;
use beacon_gateway::{DeliveryCredential, PushGateway, StaticCredentialProvider};
use beacon_storage::SqliteStorage;

/// Gateway double that records deliveries and rejects configured tokens.
#[derive(Default)]
struct RecordingGateway {
    rejected: HashSet<String>,
    delivered: Mutex<Vec<String>>,
}

impl RecordingGateway {
    fn rejecting(tokens: &[&str]) -> Self {
        Self {
            rejected: tokens.iter().map(|t| t.to_string()).collect(),
            delivered: Mutex::new(Vec::new()),
        }
    }
}

impl PushGateway for &RecordingGateway {
    async fn deliver(
        &self,
        _credential: &DeliveryCredential,
        token: &str,
        _notification: &Notification,
    ) -> Result<(), DeliveryError> {
        self.delivered.lock().unwrap().push(token.to_owned());
        if self.rejected.contains(token) {
            return Err(DeliveryError::Gateway { status: 404 });
        }
        Ok(())
    }
}

fn open_storage(dir: &tempfile::TempDir) -> SqliteStorage {
    let db_path = dir.path().join("beacon.db");
    let storage = SqliteStorage::new(db_path.to_str().unwrap()).unwrap();
    storage.run_migrations().unwrap();
    storage
}

#[tokio::test]
async fn role_audience_is_deduplicated_before_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let storage = open_storage(&dir);

    storage
        .upsert_recipient("a1", Some("admin"), &["x".into()])
        .unwrap();
    storage.upsert_recipient("a2", Some("admin"), &[]).unwrap();
    storage
        .upsert_recipient("a3", Some("admin"), &["y".into(), "x".into()])
        .unwrap();
    storage
        .upsert_recipient("v1", Some("viewer"), &["z".into()])
        .unwrap();

    let gateway = RecordingGateway::default();
    let service = PushService::new(storage, StaticCredentialProvider::new("secret"), &gateway);

    let outcome = service
        .send(
            &AudienceSelector::Role("admin".into()),
            &Notification::new("Maintenance", "Tonight at 22:00"),
        )
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::completed(2, 0));

    let mut delivered = gateway.delivered.lock().unwrap().clone();
    delivered.sort();
    assert_eq!(delivered, vec!["x", "y"]);
}

#[tokio::test]
async fn explicit_tokens_with_a_partial_failure() {
    let dir = tempfile::tempdir().unwrap();
    let storage = open_storage(&dir);

    let gateway = RecordingGateway::rejecting(&["a"]);
    let service = PushService::new(storage, StaticCredentialProvider::new("secret"), &gateway);

    let outcome = service
        .send(
            &AudienceSelector::ExplicitTokens(vec!["a".into(), "b".into()]),
            &Notification::new("Hello", "World"),
        )
        .await
        .unwrap();

    assert_eq!(outcome.sent, 1);
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.total_tokens, 2);
}

#[tokio::test]
async fn owner_ids_missing_from_the_store_skip_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let storage = open_storage(&dir);

    let gateway = RecordingGateway::default();
    let service = PushService::new(storage, StaticCredentialProvider::new("secret"), &gateway);

    let outcome = service
        .send(
            &AudienceSelector::OwnerIds(vec!["ghost-1".into(), "ghost-2".into()]),
            &Notification::new("Hello", "World"),
        )
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::skipped());
    assert!(gateway.delivered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn all_users_over_an_empty_store_skips_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let storage = open_storage(&dir);

    let gateway = RecordingGateway::default();
    let service = PushService::new(storage, StaticCredentialProvider::new("secret"), &gateway);

    let outcome = service
        .send(
            &AudienceSelector::AllUsers,
            &Notification::new("Hello", "World"),
        )
        .await
        .unwrap();

    assert!(outcome.skipped);
}

#[tokio::test]
async fn invalid_notification_fails_before_anything_runs() {
    let dir = tempfile::tempdir().unwrap();
    let storage = open_storage(&dir);

    let gateway = RecordingGateway::default();
    let service = PushService::new(storage, StaticCredentialProvider::new("secret"), &gateway);

    let result = service
        .send(
            &AudienceSelector::ExplicitTokens(vec!["a".into()]),
            &Notification::new("", "body without a title"),
        )
        .await;

    assert!(matches!(result, Err(DispatchError::InvalidNotification(_))));
    assert!(gateway.delivered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn data_payload_reaches_the_gateway_for_every_token() {
    let dir = tempfile::tempdir().unwrap();
    let storage = open_storage(&dir);

    storage
        .upsert_recipient("alice", None, &["tok-a".into(), "tok-b".into()])
        .unwrap();

    let gateway = RecordingGateway::default();
    let service = PushService::new(storage, StaticCredentialProvider::new("secret"), &gateway);

    let mut notification = Notification::new("Ping", "You have mail");
    notification
        .data
        .insert("unread".into(), serde_json::json!(5));

    let outcome = service
        .send(&AudienceSelector::OwnerIds(vec!["alice".into()]), &notification)
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::completed(2, 0));
    assert_eq!(*gateway.delivered.lock().unwrap(), vec!["tok-a", "tok-b"]);
}
