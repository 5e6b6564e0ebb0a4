// Store + storage sync end-to-end tests
use crate::mocks::MockStorage;
use serde_json::{json, Value};
use storage_sync::action::{HYDRATED, INIT};
use storage_sync::{Action, MemoryStorage, Options, Store, StorageSync};
use std::sync::Arc;

fn app_reducer(mut state: Value, action: &Action) -> Value {
    match action.action_type.as_str() {
        "SET_NAME" => {
            state["user"] = json!({"name": action.payload.clone().unwrap_or(Value::Null)});
            state
        }
        "INCREMENT" => {
            state["count"] = json!(state["count"].as_i64().unwrap_or(0) + 1);
            state
        }
        _ => state,
    }
}

#[test]
fn test_init_is_not_persisted() {
    let (storage, writes) = MockStorage::new();
    let sync = StorageSync::new(Options::new(), storage.shared());
    let store = Store::new(sync.wrap(app_reducer), json!({"count": 0}));

    assert_eq!(store.state(), &json!({"count": 0}));
    assert!(writes.is_quiet());
}

#[test]
fn test_restart_restores_persisted_keys() {
    let storage = MemoryStorage::new();
    let options = Options::new().keys(["user.name"]).hydrated_state_key("hydrated");

    {
        let sync = StorageSync::new(options.clone(), Arc::new(storage.clone()));
        let mut store = Store::new(sync.wrap(app_reducer), json!({}));
        store.dispatch(Action::with_payload("SET_NAME", json!("Ann")));
        store.dispatch(Action::new("INCREMENT"));
    }

    // writes are detached; wait for the last snapshot to land
    let deadline = std::time::Instant::now() + crate::mocks::storage::WAIT;
    while storage.raw(storage_sync::options::DEFAULT_STORAGE_KEY).is_none() {
        assert!(std::time::Instant::now() < deadline, "snapshot never written");
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    let sync = StorageSync::new(options, Arc::new(storage.clone()));
    let hydrate = sync.hydrate();
    let mut store = Store::new(sync.wrap(app_reducer), json!({"count": 0}));
    store.hydrate_from(hydrate.spawn());

    assert_eq!(store.state(), &json!({"count": 0, "user": {"name": "Ann"}, "hydrated": true}));

    let state = store.dispatch(Action::new("INCREMENT")).clone();
    assert_eq!(state["hydrated"], json!(true));
    assert_eq!(state["count"], json!(1));
}

#[test]
fn test_store_sees_lifecycle_and_hydration_order() {
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let (storage, _writes) = MockStorage::new();
    let sync = StorageSync::new(Options::new(), storage.shared());
    let hydrate = sync.hydrate();

    let mut store = Store::new(
        sync.wrap(move |state: Value, action: &Action| {
            log.lock().unwrap().push(action.action_type.clone());
            state
        }),
        json!({}),
    );
    store.hydrate(&hydrate);
    store.dispatch(Action::new("NEXT"));

    let expected = vec![INIT.to_string(), HYDRATED.to_string(), "NEXT".to_string()];
    assert_eq!(*seen.lock().unwrap(), expected);
}
