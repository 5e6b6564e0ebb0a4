use crate::action::{self, Action, HYDRATED};
use crate::common::{DotMapAccessor, DotString};
use crate::gateway::Gateway;
use crate::hydrate::Hydrate;
use crate::options::{Options, SyncErrorHandler};
use crate::ports::provided::{Reducer, SyncError};
use crate::ports::required::StorageClient;
use crate::{fn_log, warn_log};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

/// Configured storage sync, ready to wrap a reducer.
///
/// The reserved action types (`HYDRATED` and the container lifecycle
/// sentinels) are always added to the ignore set.
#[derive(Clone)]
pub struct StorageSync {
    gateway: Gateway,
    keys: Vec<DotString>,
    ignore_actions: HashSet<String>,
    hydrated_state_key: Option<DotString>,
    on_sync_error: SyncErrorHandler,
}

impl StorageSync {
    pub fn new(options: Options, client: Arc<dyn StorageClient>) -> Self {
        let gateway = Gateway::new(client, options.storage_key)
            .with_keep_falsy(options.keep_falsy);

        let mut ignore_actions: HashSet<String> = options.ignore_actions.into_iter().collect();
        ignore_actions.extend(action::RESERVED.iter().map(|t| t.to_string()));

        Self {
            gateway,
            keys: options.keys.iter().map(DotString::from).collect(),
            ignore_actions,
            hydrated_state_key: options.hydrated_state_key.as_deref().map(DotString::new),
            on_sync_error: options.on_sync_error,
        }
    }

    /// Startup producer reading from the same storage key.
    pub fn hydrate(&self) -> Hydrate {
        Hydrate::new(self.gateway.clone())
    }

    pub fn is_ignored(&self, action_type: &str) -> bool {
        self.ignore_actions.contains(action_type)
    }

    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use serde_json::{json, Value};
    /// use storage_sync::{Action, MemoryStorage, Options, Reducer, StorageSync};
    ///
    /// let storage = MemoryStorage::new();
    /// let sync = StorageSync::new(Options::new().keys(["count"]), Arc::new(storage.clone()));
    /// let reducer = sync.wrap(|state: Value, action: &Action| match action.action_type.as_str() {
    ///     "SET" => json!({"count": action.payload.clone().unwrap_or(Value::Null)}),
    ///     _ => state,
    /// });
    ///
    /// let next = reducer.reduce(json!({}), &Action::with_payload("SET", json!(3)));
    /// assert_eq!(next, json!({"count": 3}));
    /// ```
    pub fn wrap<R: Reducer>(self, reducer: R) -> SyncReducer<R> {
        SyncReducer {
            sync: self,
            reducer,
            hydrated_flags: Mutex::new(Vec::new()),
        }
    }
}

/// A reducer that persists every non-ignored transition and merges the
/// hydration payload back in.
pub struct SyncReducer<R> {
    sync: StorageSync,
    reducer: R,
    hydrated_flags: Mutex<Vec<DotString>>,
}

impl<R: Reducer> SyncReducer<R> {
    /// Whether a hydration action has been seen with a hydrated key configured.
    pub fn is_hydrated(&self) -> bool {
        !self.flags().is_empty()
    }

    fn flags(&self) -> std::sync::MutexGuard<'_, Vec<DotString>> {
        self.hydrated_flags.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_hydration(&self) {
        if let Some(key) = &self.sync.hydrated_state_key {
            let mut flags = self.flags();
            if !flags.contains(key) {
                flags.push(key.clone());
            }
        }
    }

    fn apply_flags(&self, state: &mut Value) {
        for path in self.flags().iter() {
            DotMapAccessor::force(state, path, Value::Bool(true));
        }
    }

    /// Projects `state` now and writes it on a detached thread.
    fn persist(&self, state: &Value, action_type: &str) {
        fn_log!("SyncReducer", "persist", action_type);

        let snapshot = self.sync.gateway.project(state, &self.sync.keys);
        let gateway = self.sync.gateway.clone();
        let on_error = Arc::clone(&self.sync.on_sync_error);
        let on_spawn_error = Arc::clone(&self.sync.on_sync_error);

        let spawned = thread::Builder::new()
            .name("storage-sync-write".to_string())
            .spawn(move || {
                if let Err(e) = gateway.write(&snapshot) {
                    warn_log!("SyncReducer", "persist", &e.to_string());
                    on_error(&e);
                }
            });

        if let Err(e) = spawned {
            let error = SyncError::StorageWrite(format!("could not start write: {}", e));
            warn_log!("SyncReducer", "persist", &error.to_string());
            on_spawn_error(&error);
        }
    }
}

impl<R: Reducer> Reducer for SyncReducer<R> {
    fn reduce(&self, mut state: Value, action: &Action) -> Value {
        if action.is(HYDRATED) {
            fn_log!("SyncReducer", "reduce", HYDRATED);
            let payload = action.payload.clone().unwrap_or(Value::Object(Map::new()));
            DotMapAccessor::spread(&mut state, payload);
            self.record_hydration();
        }

        let mut next_state = self.reducer.reduce(state, action);
        if !next_state.is_object() {
            next_state = Value::Object(Map::new());
        }
        self.apply_flags(&mut next_state);

        if !self.sync.is_ignored(&action.action_type) {
            self.persist(&next_state, &action.action_type);
        }

        next_state
    }
}
