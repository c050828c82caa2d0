//! Behavior shared by every session store backend.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use conduit_config::{SessionBackend, SessionConfig};
use conduit_core::entities::ChatHistory;
use conduit_session::{
    InMemorySessionStore, JsonFileSessionStore, LibsqlSessionStore, SessionStore, open_store,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

#[derive(Debug, Clone, Copy)]
enum Backend {
    Memory,
    File,
    Libsql,
}

async fn open(backend: Backend) -> (Arc<dyn SessionStore>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn SessionStore> = match backend {
        Backend::Memory => Arc::new(InMemorySessionStore::new()),
        Backend::File => Arc::new(JsonFileSessionStore::in_dir(dir.path())),
        Backend::Libsql => {
            let path = dir.path().join("sessions.db");
            Arc::new(
                LibsqlSessionStore::open_local(path.to_str().unwrap())
                    .await
                    .unwrap(),
            )
        }
    };
    (store, dir)
}

fn session(id: &str, case_id: &str, minutes: i64) -> ChatHistory {
    let base = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    ChatHistory {
        id: id.into(),
        case_id: case_id.into(),
        case_name: format!("Case {case_id}"),
        title: format!("Chat: Case {case_id}"),
        messages: Vec::new(),
        created_at: base,
        updated_at: base + Duration::minutes(minutes),
    }
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::file(Backend::File)]
#[case::libsql(Backend::Libsql)]
#[tokio::test]
async fn put_get_delete(#[case] backend: Backend) {
    let (store, _dir) = open(backend).await;
    let original = session("session-a", "case-1", 0);

    store.put(original.clone()).await.unwrap();
    assert_eq!(store.get("session-a").await.unwrap(), Some(original));

    assert!(store.delete("session-a").await.unwrap());
    assert!(!store.delete("session-a").await.unwrap());
    assert_eq!(store.get("session-a").await.unwrap(), None);
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::file(Backend::File)]
#[case::libsql(Backend::Libsql)]
#[tokio::test]
async fn put_replaces_existing_session(#[case] backend: Backend) {
    let (store, _dir) = open(backend).await;
    store.put(session("session-a", "case-1", 0)).await.unwrap();

    let mut renamed = session("session-a", "case-1", 5);
    renamed.title = "Chat: renamed".into();
    store.put(renamed).await.unwrap();

    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Chat: renamed");
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::file(Backend::File)]
#[case::libsql(Backend::Libsql)]
#[tokio::test]
async fn list_is_most_recent_first_and_filters_by_case(#[case] backend: Backend) {
    let (store, _dir) = open(backend).await;
    store.put(session("old", "case-1", 1)).await.unwrap();
    store.put(session("newest", "case-2", 30)).await.unwrap();
    store.put(session("middle", "case-1", 10)).await.unwrap();

    let ids: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["newest", "middle", "old"]);

    let case_one: Vec<String> = store
        .list_by_case("case-1")
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(case_one, vec!["middle", "old"]);
    assert!(store.list_by_case("case-9").await.unwrap().is_empty());
}

#[tokio::test]
async fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    JsonFileSessionStore::in_dir(dir.path())
        .put(session("session-a", "case-1", 0))
        .await
        .unwrap();

    let reopened = JsonFileSessionStore::in_dir(dir.path());
    assert!(reopened.get("session-a").await.unwrap().is_some());
}

#[tokio::test]
async fn open_store_follows_backend_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = SessionConfig {
        backend: SessionBackend::File,
        path: dir
            .path()
            .join("sessions.json")
            .to_string_lossy()
            .into_owned(),
    };
    let store = open_store(&config).await.unwrap();
    store.put(session("session-a", "case-1", 0)).await.unwrap();
    assert!(dir.path().join("sessions.json").exists());

    let memory = open_store(&SessionConfig::default()).await.unwrap();
    assert!(memory.list().await.unwrap().is_empty());
}
