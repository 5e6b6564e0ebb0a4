use crate::action::{Action, INIT, UPDATE_REDUCERS};
use crate::common::LogFormat;
use crate::hydrate::{Hydrate, HydrateHandle};
use crate::{fn_log, warn_log};
use crate::ports::provided::Reducer;
use serde_json::Value;

/// Minimal single-tree state container.
///
/// Holds one reducer and the current state, and replaces the state on every
/// dispatch. `INIT` is dispatched on construction and `UPDATE_REDUCERS` on
/// reducer replacement. Hydration is accepted once; later attempts leave
/// the state alone.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use serde_json::{json, Value};
/// use storage_sync::{Action, MemoryStorage, Options, Store, StorageSync};
///
/// let storage = MemoryStorage::new();
/// let sync = StorageSync::new(Options::new().keys(["user.name"]), Arc::new(storage.clone()));
/// let hydrate = sync.hydrate();
///
/// let reducer = sync.wrap(|state: Value, action: &Action| match action.action_type.as_str() {
///     "SET_NAME" => json!({"user": {"name": action.payload.clone().unwrap_or(Value::Null)}}),
///     _ => state,
/// });
/// let mut store = Store::new(reducer, json!({}));
///
/// store.hydrate(&hydrate);
/// store.dispatch(Action::with_payload("SET_NAME", json!("Ann")));
/// assert_eq!(store.state(), &json!({"user": {"name": "Ann"}}));
/// ```
pub struct Store {
    reducer: Box<dyn Reducer>,
    state: Value,
    hydrated: bool,
}

impl Store {
    pub fn new(reducer: impl Reducer + 'static, initial: Value) -> Self {
        let mut store = Self {
            reducer: Box::new(reducer),
            state: initial,
            hydrated: false,
        };
        store.dispatch(Action::new(INIT));
        store
    }

    pub fn state(&self) -> &Value {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> &Value {
        fn_log!("Store", "dispatch", &action.action_type);

        let previous = std::mem::take(&mut self.state);
        self.state = self.reducer.reduce(previous, &action);
        &self.state
    }

    pub fn replace_reducer(&mut self, reducer: impl Reducer + 'static) {
        self.reducer = Box::new(reducer);
        self.dispatch(Action::new(UPDATE_REDUCERS));
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Loads persisted state on a worker and dispatches the hydration action.
    ///
    /// A storage client that panics while loading hydrates with `{}`, the same
    /// as `hydrate_from(hydrate.spawn())`. No-op once hydrated.
    pub fn hydrate(&mut self, hydrate: &Hydrate) -> &Value {
        if self.hydrated {
            warn_log!("Store", "hydrate", "already hydrated, skipping load");
            return &self.state;
        }
        self.hydrate_from(hydrate.spawn())
    }

    /// Dispatches the hydration action of a load started with `Hydrate::spawn`.
    /// No-op once hydrated: the late payload is dropped.
    pub fn hydrate_from(&mut self, handle: HydrateHandle) -> &Value {
        let action = handle.join();
        if self.hydrated {
            let payload = action.payload.unwrap_or_default();
            warn_log!(
                "Store",
                "hydrate_from",
                &format!("already hydrated, dropping {}", LogFormat::format_arg(&payload))
            );
            return &self.state;
        }
        self.hydrated = true;
        self.dispatch(action)
    }
}
