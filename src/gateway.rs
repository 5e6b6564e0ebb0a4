use crate::common::{DotMapAccessor, DotString};
use crate::ports::provided::SyncError;
use crate::ports::required::StorageClient;
use crate::{fn_log, warn_log};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Reads and writes the persisted snapshot under a single storage key.
///
/// Cloning is cheap and shares the storage client.
#[derive(Clone)]
pub struct Gateway {
    client: Arc<dyn StorageClient>,
    key: String,
    keep_falsy: bool,
}

impl Gateway {
    pub fn new(client: Arc<dyn StorageClient>, key: impl Into<String>) -> Self {
        Self {
            client,
            key: key.into(),
            keep_falsy: false,
        }
    }

    pub fn with_keep_falsy(mut self, keep: bool) -> Self {
        self.keep_falsy = keep;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the snapshot, reporting why it could not be read.
    ///
    /// A missing entry, JSON `null` or any other non-object value reads as `{}`.
    pub fn fetch(&self) -> Result<Value, SyncError> {
        fn_log!("Gateway", "fetch", &self.key);

        let text = self.client.get(&self.key).map_err(SyncError::StorageRead)?;
        let Some(text) = text else {
            return Ok(Value::Object(Map::new()));
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(value @ Value::Object(_)) => Ok(value),
            Ok(_) => Ok(Value::Object(Map::new())),
            Err(e) => Err(SyncError::Parse(e.to_string())),
        }
    }

    /// Reads the snapshot. Never fails: anything unreadable is an empty mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use serde_json::json;
    /// use storage_sync::{Gateway, MemoryStorage, StorageClient};
    ///
    /// let storage = MemoryStorage::new();
    /// let gateway = Gateway::new(Arc::new(storage.clone()), "APP");
    /// assert_eq!(gateway.load_all(), json!({}));
    ///
    /// storage.set("APP", "{not json".to_string()).unwrap();
    /// assert_eq!(gateway.load_all(), json!({}));
    ///
    /// storage.set("APP", r#"{"count":5}"#.to_string()).unwrap();
    /// assert_eq!(gateway.load_all(), json!({"count": 5}));
    /// ```
    pub fn load_all(&self) -> Value {
        self.fetch().unwrap_or_else(|e| {
            warn_log!("Gateway", "load_all", &format!("treating snapshot as empty: {}", e));
            Value::Object(Map::new())
        })
    }

    /// Builds the snapshot for `state`.
    ///
    /// With no paths the whole state is the snapshot. Otherwise each path is
    /// copied only when its value is truthy; `keep_falsy` relaxes that to any
    /// non-null value.
    pub fn project(&self, state: &Value, paths: &[DotString]) -> Value {
        if paths.is_empty() {
            return state.clone();
        }

        let mut snapshot = Value::Object(Map::new());
        for path in paths {
            let Some(value) = DotMapAccessor::get(state, path) else {
                continue;
            };
            let keep = if self.keep_falsy {
                !value.is_null()
            } else {
                DotMapAccessor::is_truthy(value)
            };
            if keep {
                DotMapAccessor::set(&mut snapshot, path, value.clone());
            }
        }
        snapshot
    }

    /// Serializes and stores an already projected snapshot.
    pub fn write(&self, snapshot: &Value) -> Result<(), SyncError> {
        fn_log!("Gateway", "write", &self.key);

        let serialized = serde_json::to_string(snapshot)
            .map_err(|e| SyncError::Serialize(e.to_string()))?;
        self.client
            .set(&self.key, serialized)
            .map_err(SyncError::StorageWrite)
    }

    pub fn save_filtered(&self, state: &Value, paths: &[DotString]) -> Result<(), SyncError> {
        self.write(&self.project(state, paths))
    }

    /// Drops the persisted snapshot. Returns whether one existed.
    pub fn clear(&self) -> Result<bool, SyncError> {
        fn_log!("Gateway", "clear", &self.key);

        self.client.remove(&self.key).map_err(SyncError::StorageWrite)
    }
}
