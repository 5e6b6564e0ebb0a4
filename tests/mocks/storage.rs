// Mock StorageClient recording every write
use storage_sync::StorageClient;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const WAIT: Duration = Duration::from_secs(5);
pub const QUIET: Duration = Duration::from_millis(200);

pub struct MockStorage {
    pub data: Mutex<HashMap<String, String>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub panic_on_read: bool,
    writes: Mutex<Sender<(String, String)>>,
}

/// Receiving end of every `set` call made on a MockStorage.
pub struct WriteLog {
    rx: Receiver<(String, String)>,
}

#[allow(dead_code)]
impl MockStorage {
    pub fn new() -> (Self, WriteLog) {
        let (tx, rx) = mpsc::channel();
        let storage = Self {
            data: Mutex::new(HashMap::new()),
            fail_reads: false,
            fail_writes: false,
            panic_on_read: false,
            writes: Mutex::new(tx),
        };
        (storage, WriteLog { rx })
    }

    pub fn failing_writes() -> (Self, WriteLog) {
        let (mut storage, log) = Self::new();
        storage.fail_writes = true;
        (storage, log)
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.data.lock().unwrap().insert(key.to_string(), value.to_string());
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl StorageClient for MockStorage {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        if self.panic_on_read {
            panic!("storage backend crashed");
        }
        if self.fail_reads {
            return Err("storage unavailable".to_string());
        }
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), String> {
        let _ = self.writes.lock().unwrap().send((key.to_string(), value.clone()));
        if self.fail_writes {
            return Err("disk full".to_string());
        }
        self.data.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, String> {
        Ok(self.data.lock().unwrap().remove(key).is_some())
    }
}

#[allow(dead_code)]
impl WriteLog {
    /// Next write, parsed back into JSON. Panics if none arrives in time.
    pub fn next(&self) -> (String, serde_json::Value) {
        let (key, text) = self.rx.recv_timeout(WAIT).expect("expected a storage write");
        (key, serde_json::from_str(&text).expect("written snapshot must be JSON"))
    }

    /// True when no write shows up within a short window.
    pub fn is_quiet(&self) -> bool {
        self.rx.recv_timeout(QUIET).is_err()
    }
}
