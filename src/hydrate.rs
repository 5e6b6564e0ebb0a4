use crate::action::{Action, HYDRATED};
use crate::gateway::Gateway;
use crate::{fn_log, warn_log};
use serde_json::{Map, Value};
use std::thread::{self, JoinHandle};

/// Produces the one hydration action fed to the container at startup.
///
/// Loading never fails from the caller's side: an unreadable snapshot, and a
/// worker that dies while reading it, both hydrate with `{}`.
#[derive(Clone)]
pub struct Hydrate {
    gateway: Gateway,
}

impl Hydrate {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use serde_json::json;
    /// use storage_sync::{action, Gateway, Hydrate, MemoryStorage, StorageClient};
    ///
    /// let storage = MemoryStorage::new();
    /// storage.set("APP", r#"{"count":5}"#.to_string()).unwrap();
    ///
    /// let hydrate = Hydrate::new(Gateway::new(Arc::new(storage), "APP"));
    /// let hydrated = hydrate.run();
    /// assert_eq!(hydrated.action_type, action::HYDRATED);
    /// assert_eq!(hydrated.payload, Some(json!({"count": 5})));
    /// ```
    pub fn run(&self) -> Action {
        fn_log!("Hydrate", "run", self.gateway.key());
        Action::with_payload(HYDRATED, self.gateway.load_all())
    }

    /// Loads on a background thread.
    pub fn spawn(&self) -> HydrateHandle {
        let hydrate = self.clone();
        let inner = thread::Builder::new()
            .name("storage-sync-hydrate".to_string())
            .spawn(move || hydrate.run());

        match inner {
            Ok(handle) => HydrateHandle { inner: Some(handle) },
            Err(e) => {
                warn_log!("Hydrate", "spawn", &format!("hydrating empty: {}", e));
                HydrateHandle { inner: None }
            }
        }
    }

    pub fn empty() -> Action {
        Action::with_payload(HYDRATED, Value::Object(Map::new()))
    }
}

pub struct HydrateHandle {
    inner: Option<JoinHandle<Action>>,
}

impl HydrateHandle {
    /// Blocks until the load is done.
    pub fn join(self) -> Action {
        let Some(handle) = self.inner else {
            return Hydrate::empty();
        };
        handle.join().unwrap_or_else(|_| {
            warn_log!("Hydrate", "join", "load worker panicked, hydrating empty");
            Hydrate::empty()
        })
    }
}
