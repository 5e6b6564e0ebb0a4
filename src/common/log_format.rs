use serde_json::Value;

const MAX_ARG_CHARS: usize = 47;

/// # Examples
/// ```
/// use storage_sync::common::log_format::LogFormat;
///
/// let fn_message = LogFormat::call("Gateway", "save_filtered", &["'user.name'".to_string()]);
/// assert_eq!(fn_message, "Gateway::save_filtered('user.name')");
///
/// let warn_message = LogFormat::warn("Gateway", "load_all", "snapshot is not valid JSON");
/// assert_eq!(warn_message, "Gateway::load_all: snapshot is not valid JSON");
/// ```
pub struct LogFormat;

impl LogFormat {

    pub fn call(class: &str, fn_name: &str, args: &[String]) -> String {
        let args_str = args.join(", ");
        format!("{}::{}({})", class, fn_name, args_str)
    }

    pub fn warn(class: &str, fn_name: &str, message: &str) -> String {
        format!("{}::{}: {}", class, fn_name, message)
    }

    /// Format JSON value for log output
    ///
    /// # Examples
    /// ```
    /// use storage_sync::common::log_format::LogFormat;
    /// use serde_json::json;
    ///
    /// assert_eq!(LogFormat::format_arg(&json!("text")), "'text'");
    /// assert_eq!(LogFormat::format_arg(&json!(42)), "42");
    /// assert_eq!(LogFormat::format_arg(&json!(null)), "null");
    /// assert_eq!(LogFormat::format_arg(&json!([1, 2, 3])), "[3 items]");
    /// assert_eq!(LogFormat::format_arg(&json!({"a": 1})), "{1 fields}");
    /// ```
    pub fn format_arg(value: &Value) -> String {
        match value {
            Value::String(s) => Self::format_str_arg(s),
            Value::Array(arr) if arr.is_empty() => "[]".to_string(),
            Value::Array(arr) => format!("[{} items]", arr.len()),
            Value::Object(obj) if obj.is_empty() => "{}".to_string(),
            Value::Object(obj) => format!("{{{} fields}}", obj.len()),
            other => other.to_string(),
        }
    }

    /// Quotes `s`, cutting it at a char boundary when it runs long.
    pub fn format_str_arg(s: &str) -> String {
        match s.char_indices().nth(MAX_ARG_CHARS + 3) {
            Some(_) => {
                let cut = s.char_indices().nth(MAX_ARG_CHARS).map_or(s.len(), |(i, _)| i);
                format!("'{}'...", &s[..cut])
            }
            None => format!("'{}'", s),
        }
    }
}

/// Debug-level call trace, compiled out without the `logging` feature.
///
/// ```ignore
/// fn_log!("Gateway", "load_all", "APP_STATE");
/// // Logs: Gateway::load_all('APP_STATE')
/// ```
#[macro_export]
macro_rules! fn_log {
    ($class:expr, $fun:expr $(, $arg:expr)*) => {{
        #[cfg(feature = "logging")]
        {
            let args: Vec<String> = vec![
                $(
                    $crate::common::log_format::LogFormat::format_str_arg($arg),
                )*
            ];
            log::debug!("{}", $crate::common::log_format::LogFormat::call($class, $fun, &args));
        }
        #[cfg(not(feature = "logging"))]
        {
            let _ = ($class, $fun $(, $arg)*);
        }
    }};
}

/// Warn-level message, compiled out without the `logging` feature.
#[macro_export]
macro_rules! warn_log {
    ($class:expr, $fun:expr, $msg:expr) => {{
        #[cfg(feature = "logging")]
        {
            log::warn!("{}", $crate::common::log_format::LogFormat::warn($class, $fun, $msg));
        }
        #[cfg(not(feature = "logging"))]
        {
            let _ = ($class, $fun, $msg);
        }
    }};
}
