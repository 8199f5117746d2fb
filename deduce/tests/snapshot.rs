use deduce::persistence::{self, SessionSnapshot, SnapshotStore, SnapshotTask};
use deduce::SessionManager;
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;
use uuid::Uuid;

#[test]
fn snapshot_round_trip_preserves_sessions() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("sessions.json"));

    let original = SessionManager::default();
    let first = original.create_session(10).unwrap();
    original.add_lines(&first, &["a -> b", "a"]).unwrap();
    original.run_search(&first).unwrap();
    let second = original.create_session(3).unwrap();
    original.add_lines(&second, &["p ∨ q"]).unwrap();
    store.save(&original.snapshot()).unwrap();

    let restored = SessionManager::default();
    assert_eq!(persistence::restore(&restored, &store), 2);
    assert_eq!(restored.list_sessions(), original.list_sessions());
    for id in [first, second] {
        assert_eq!(
            restored.get_lines(&id).unwrap(),
            original.get_lines(&id).unwrap()
        );
    }

    // The restored engine knows every line, derived ones included.
    assert!(restored.add_lines(&first, &["b"]).unwrap().is_empty());
    assert!(restored.run_search(&first).unwrap().is_empty());
}

#[test]
fn snapshot_file_is_a_flat_json_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sessions.json");
    let manager = SessionManager::default();
    let id = manager.create_session(4).unwrap();
    manager.add_lines(&id, &["a -> b"]).unwrap();
    SnapshotStore::new(&path).save(&manager.snapshot()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "id": id.to_string(), "limit": 4, "lines": ["a\n----\nb"] }])
    );
}

#[test]
fn missing_or_corrupt_files_start_empty() {
    let dir = tempdir().unwrap();
    let manager = SessionManager::default();

    let missing = SnapshotStore::new(dir.path().join("none.json"));
    assert_eq!(persistence::restore(&manager, &missing), 0);

    let corrupt_path = dir.path().join("corrupt.json");
    fs::write(&corrupt_path, "[{\"id\": 42").unwrap();
    assert_eq!(
        persistence::restore(&manager, &SnapshotStore::new(&corrupt_path)),
        0
    );
    assert_eq!(manager.session_count(), 0);
}

#[test]
fn bad_entries_are_skipped_individually() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("sessions.json"));
    let good = Uuid::new_v4();
    store
        .save(&[
            SessionSnapshot {
                id: Uuid::new_v4(),
                limit: -1,
                lines: vec!["a".to_string()],
            },
            SessionSnapshot {
                id: good,
                limit: 5,
                lines: vec!["a".to_string(), "not ) valid".to_string()],
            },
        ])
        .unwrap();

    let manager = SessionManager::default();
    assert_eq!(persistence::restore(&manager, &store), 1);
    assert_eq!(manager.get_lines(&good).unwrap(), vec!["a".to_string()]);
}

#[tokio::test]
async fn flush_writes_the_current_table() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("sessions.json"));
    let manager = Arc::new(SessionManager::default());
    let id = manager.create_session(6).unwrap();
    manager.add_lines(&id, &["q"]).unwrap();

    let task = SnapshotTask::new(manager.clone(), store.clone(), Duration::from_secs(60));
    task.flush().await.unwrap();

    let saved = store.load().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, id);
    assert_eq!(saved[0].lines, vec!["q".to_string()]);
}

#[tokio::test]
async fn periodic_task_rewrites_the_file() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("sessions.json"));
    let manager = Arc::new(SessionManager::default());

    let task = Arc::new(SnapshotTask::new(
        manager.clone(),
        store.clone(),
        Duration::from_millis(20),
    ));
    let handle = task.start();
    manager.create_session(2).unwrap();

    let mut saved = Vec::new();
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        saved = store.load().unwrap_or_default();
        if !saved.is_empty() {
            break;
        }
    }
    handle.abort();
    assert_eq!(saved.len(), 1);
}
