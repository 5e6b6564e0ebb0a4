// Persistence gateway integration tests
use crate::mocks::MockStorage;
use serde_json::json;
use storage_sync::common::DotString;
use storage_sync::{FileStorage, Gateway, SyncError};

const KEY: &str = "APP_STATE";

fn paths(list: &[&str]) -> Vec<DotString> {
    list.iter().map(|p| DotString::new(p)).collect()
}

#[test]
fn test_save_without_paths_persists_whole_state() {
    let (storage, writes) = MockStorage::new();
    let gateway = Gateway::new(storage.shared(), KEY);
    let state = json!({"a": {"b": 0}, "list": [1, 2], "flag": false});

    gateway.save_filtered(&state, &[]).unwrap();

    let (key, snapshot) = writes.next();
    assert_eq!(key, KEY);
    assert_eq!(snapshot, state);
}

#[test]
fn test_save_filtered_truthy_value() {
    let (storage, writes) = MockStorage::new();
    let gateway = Gateway::new(storage.shared(), KEY);

    gateway
        .save_filtered(&json!({"a": {"b": "kept", "c": 1}, "d": 2}), &paths(&["a.b"]))
        .unwrap();
    assert_eq!(writes.next().1, json!({"a": {"b": "kept"}}));
}

#[test]
fn test_save_filtered_falsy_or_absent_value() {
    let (storage, writes) = MockStorage::new();
    let gateway = Gateway::new(storage.shared(), KEY);

    let states = [
        json!({"a": {"b": 0}}),
        json!({"a": {"b": ""}}),
        json!({"a": {"b": false}}),
        json!({"a": null}),
        json!({}),
    ];
    for state in states {
        gateway.save_filtered(&state, &paths(&["a.b"])).unwrap();
        assert_eq!(writes.next().1, json!({}), "state {}", state);
    }
}

#[test]
fn test_save_reports_write_failure() {
    let (storage, _writes) = MockStorage::failing_writes();
    let gateway = Gateway::new(storage.shared(), KEY);

    let result = gateway.save_filtered(&json!({"a": 1}), &[]);
    assert_eq!(result, Err(SyncError::StorageWrite("disk full".to_string())));
}

#[test]
fn test_load_all_never_fails() {
    let (empty, _) = MockStorage::new();
    assert_eq!(Gateway::new(empty.shared(), KEY).load_all(), json!({}));

    let (corrupt, _) = MockStorage::new();
    let corrupt = corrupt.with_entry(KEY, "{\"count\": ");
    assert_eq!(Gateway::new(corrupt.shared(), KEY).load_all(), json!({}));

    let (mut failing, _) = MockStorage::new();
    failing.fail_reads = true;
    let gateway = Gateway::new(failing.shared(), KEY);
    assert_eq!(gateway.load_all(), json!({}));
    assert_eq!(gateway.fetch(), Err(SyncError::StorageRead("storage unavailable".to_string())));
}

#[test]
fn test_load_all_reads_own_key_only() {
    let (storage, _) = MockStorage::new();
    let storage = storage
        .with_entry(KEY, r#"{"count": 5}"#)
        .with_entry("OTHER", r#"{"count": 9}"#);
    assert_eq!(Gateway::new(storage.shared(), KEY).load_all(), json!({"count": 5}));
}

#[test]
fn test_file_storage_round_trip() {
    let dir = std::env::temp_dir().join(format!("storage-sync-gateway-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let gateway = Gateway::new(std::sync::Arc::new(FileStorage::new(&dir)), KEY);

    gateway
        .save_filtered(&json!({"user": {"name": "Ann", "token": "t"}}), &paths(&["user.name"]))
        .unwrap();
    assert_eq!(gateway.load_all(), json!({"user": {"name": "Ann"}}));
    assert_eq!(gateway.clear(), Ok(true));
    assert_eq!(gateway.load_all(), json!({}));

    let _ = std::fs::remove_dir_all(&dir);
}
