use crate::ports::provided::{OptionsError, SyncError};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_STORAGE_KEY: &str = "STORAGE_SYNC_APP_STATE";

/// Called once for every failed snapshot write.
pub type SyncErrorHandler = Arc<dyn Fn(&SyncError) + Send + Sync>;

fn noop_handler() -> SyncErrorHandler {
    Arc::new(|_: &SyncError| {})
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// Decorator configuration. Every field is optional in YAML.
///
/// # Examples
///
/// ```
/// use storage_sync::Options;
///
/// let options = Options::from_yaml_str(r#"
/// keys:
///   - user.name
///   - settings
/// ignore_actions:
///   - TICK
/// hydrated_state_key: ui.ready
/// "#).unwrap();
///
/// assert_eq!(options.keys, vec!["user.name", "settings"]);
/// assert_eq!(options.hydrated_state_key.as_deref(), Some("ui.ready"));
/// assert_eq!(options.storage_key, "STORAGE_SYNC_APP_STATE");
/// assert!(!options.keep_falsy);
/// ```
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Paths to persist. Empty persists the whole tree.
    pub keys: Vec<String>,
    /// Action types that never trigger a write.
    pub ignore_actions: Vec<String>,
    /// Path forced to `true` on every transition after hydration.
    pub hydrated_state_key: Option<String>,
    pub storage_key: String,
    /// Keep `0`, `false` and `""` in filtered snapshots instead of dropping them.
    pub keep_falsy: bool,
    #[serde(skip, default = "noop_handler")]
    pub on_sync_error: SyncErrorHandler,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, OptionsError> {
        serde_yaml_ng::from_str(yaml).map_err(|e| OptionsError::ParseError(e.to_string()))
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| OptionsError::ReadError(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn ignore_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_actions = actions.into_iter().map(Into::into).collect();
        self
    }

    pub fn hydrated_state_key(mut self, key: impl Into<String>) -> Self {
        self.hydrated_state_key = Some(key.into());
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn keep_falsy(mut self, keep: bool) -> Self {
        self.keep_falsy = keep;
        self
    }

    pub fn on_sync_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(&SyncError) + Send + Sync + 'static,
    {
        self.on_sync_error = Arc::new(handler);
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            ignore_actions: Vec::new(),
            hydrated_state_key: None,
            storage_key: default_storage_key(),
            keep_falsy: false,
            on_sync_error: noop_handler(),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("keys", &self.keys)
            .field("ignore_actions", &self.ignore_actions)
            .field("hydrated_state_key", &self.hydrated_state_key)
            .field("storage_key", &self.storage_key)
            .field("keep_falsy", &self.keep_falsy)
            .finish_non_exhaustive()
    }
}
