use serde_json::{Map, Value};
use crate::common::DotString;

/// Path-addressed reads and writes over a `serde_json::Value` tree.
///
/// Objects are stepped by key, arrays by numeric segment. Reads never fail:
/// a null root or empty path hands the root back, a null intermediate stops the
/// walk and is returned as-is, and a missing key yields `None`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use storage_sync::common::{DotMapAccessor, DotString};
///
/// let mut state = json!({});
/// let path = DotString::new("user.profile.name");
/// DotMapAccessor::set(&mut state, &path, json!("Ann"));
///
/// assert_eq!(state, json!({"user": {"profile": {"name": "Ann"}}}));
/// assert_eq!(DotMapAccessor::get(&state, &path), Some(&json!("Ann")));
/// assert_eq!(DotMapAccessor::get(&state, &DotString::new("user.age")), None);
/// ```
pub struct DotMapAccessor;

impl DotMapAccessor {

    pub fn get<'a>(data: &'a Value, dot_string: &DotString) -> Option<&'a Value> {
        if data.is_null() || dot_string.is_empty() {
            return Some(data);
        }

        let mut current = data;
        for segment in dot_string.iter() {
            if current.is_null() {
                return Some(current);
            }
            current = Self::child(current, segment)?;
        }

        Some(current)
    }

    /// Assigns `value` at the path, creating `{}` for every missing or falsy
    /// intermediate. A truthy scalar in the way ends the walk untouched.
    /// Null roots, scalar roots and empty paths are left as they are.
    pub fn set(data: &mut Value, dot_string: &DotString, value: Value) {
        if dot_string.is_empty() || !Self::is_container(data) {
            return;
        }

        let last_idx = dot_string.len() - 1;
        let mut current = data;

        for (i, segment) in dot_string.iter().enumerate() {
            if i == last_idx {
                Self::assign(current, segment, value);
                return;
            }

            let present = Self::child(current, segment).is_some_and(Self::is_truthy);
            if !present && !Self::assign(current, segment, Value::Object(Map::new())) {
                return;
            }

            match Self::child_mut(current, segment) {
                Some(next) if Self::is_container(next) => current = next,
                _ => return,
            }
        }
    }

    /// Like `set`, but anything that is not an object along the way (root
    /// included) is replaced by one, so the value always lands.
    pub fn force(data: &mut Value, dot_string: &DotString, value: Value) {
        if dot_string.is_empty() {
            return;
        }
        if !data.is_object() {
            *data = Value::Object(Map::new());
        }

        let last_idx = dot_string.len() - 1;
        let mut current = data;

        for (i, segment) in dot_string.iter().enumerate() {
            let Some(obj) = current.as_object_mut() else {
                return;
            };

            if i == last_idx {
                obj.insert(segment.to_string(), value);
                return;
            }

            let next = obj
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !next.is_object() {
                *next = Value::Object(Map::new());
            }
            current = next;
        }
    }

    /// Top-level spread: every key of `source` overwrites the same key of
    /// `target`. A non-object `target` starts over as `{}`; a non-object
    /// `source` contributes nothing.
    pub fn spread(target: &mut Value, source: Value) {
        if !target.is_object() {
            *target = Value::Object(Map::new());
        }

        if let (Some(target_obj), Value::Object(source_obj)) = (target.as_object_mut(), source) {
            for (k, v) in source_obj {
                target_obj.insert(k, v);
            }
        }
    }

    /// Loose truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy.
    /// Arrays and objects are truthy even when empty.
    pub fn is_truthy(value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    fn is_container(value: &Value) -> bool {
        value.is_object() || value.is_array()
    }

    fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
        match value {
            Value::Object(obj) => obj.get(segment),
            Value::Array(arr) => segment.parse::<usize>().ok().and_then(|i| arr.get(i)),
            _ => None,
        }
    }

    fn child_mut<'a>(value: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
        match value {
            Value::Object(obj) => obj.get_mut(segment),
            Value::Array(arr) => match segment.parse::<usize>() {
                Ok(i) => arr.get_mut(i),
                Err(_) => None,
            },
            _ => None,
        }
    }

    /// Returns false when `container` cannot take the segment.
    fn assign(container: &mut Value, segment: &str, value: Value) -> bool {
        match container {
            Value::Object(obj) => {
                obj.insert(segment.to_string(), value);
                true
            }
            Value::Array(arr) => match segment.parse::<usize>() {
                Ok(i) if i < arr.len() => {
                    arr[i] = value;
                    true
                }
                Ok(i) if i == arr.len() => {
                    arr.push(value);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}
