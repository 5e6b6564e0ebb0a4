use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dispatched once persisted state has been loaded; its payload is merged into state.
pub const HYDRATED: &str = "@storage-sync/hydrated";

/// Lifecycle sentinels a state container emits on its own. None of them is persisted.
pub const INIT: &str = "@store/init";
pub const EFFECTS_INIT: &str = "@effects/init";
pub const UPDATE_REDUCERS: &str = "@store/update-reducers";

pub const RESERVED: [&str; 4] = [HYDRATED, INIT, EFFECTS_INIT, UPDATE_REDUCERS];

/// # Examples
///
/// ```
/// use storage_sync::Action;
/// use serde_json::json;
///
/// let raw = json!({"type": "SET_NAME", "payload": "Ann"});
/// let action: Action = serde_json::from_value(raw).unwrap();
/// assert_eq!(action, Action::with_payload("SET_NAME", json!("Ann")));
///
/// let bare: Action = serde_json::from_value(json!({"type": "RESET"})).unwrap();
/// assert_eq!(bare.payload, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Action {
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: None,
        }
    }

    pub fn with_payload(action_type: impl Into<String>, payload: Value) -> Self {
        Self {
            action_type: action_type.into(),
            payload: Some(payload),
        }
    }

    pub fn is(&self, action_type: &str) -> bool {
        self.action_type == action_type
    }
}
