use crate::action::Action;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum SyncError {
    StorageRead(String),
    StorageWrite(String),
    Serialize(String),
    Parse(String),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::StorageRead(msg)  => write!(f, "StorageRead: {}", msg),
            SyncError::StorageWrite(msg) => write!(f, "StorageWrite: {}", msg),
            SyncError::Serialize(msg)    => write!(f, "Serialize: {}", msg),
            SyncError::Parse(msg)        => write!(f, "Parse: {}", msg),
        }
    }
}

impl std::error::Error for SyncError {}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionsError {
    ReadError(String),
    ParseError(String),
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionsError::ReadError(msg)  => write!(f, "ReadError: {}", msg),
            OptionsError::ParseError(msg) => write!(f, "ParseError: {}", msg),
        }
    }
}

impl std::error::Error for OptionsError {}

/// A pure state transition: the previous tree and an action in, the next tree out.
///
/// Any `Fn(Value, &Action) -> Value` closure is a reducer.
///
/// # Examples
///
/// ```
/// use storage_sync::{Action, Reducer};
/// use serde_json::{json, Value};
///
/// let counter = |state: Value, action: &Action| match action.action_type.as_str() {
///     "INCREMENT" => json!({"count": state["count"].as_i64().unwrap_or(0) + 1}),
///     _ => state,
/// };
///
/// let next = counter.reduce(json!({"count": 1}), &Action::new("INCREMENT"));
/// assert_eq!(next, json!({"count": 2}));
/// ```
pub trait Reducer: Send + Sync {
    fn reduce(&self, state: Value, action: &Action) -> Value;
}

impl<F> Reducer for F
where
    F: Fn(Value, &Action) -> Value + Send + Sync,
{
    fn reduce(&self, state: Value, action: &Action) -> Value {
        self(state, action)
    }
}
