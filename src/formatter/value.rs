//! Text forms of single claim values.

use serde_json::Value;

/// Display text for a scalar claim. Containers fall back to compact JSON.
///
/// Strings are emitted without quotes, `null` as the empty string and numbers
/// in serde_json's shortest round-trip form.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => jsonify(value),
    }
}

/// Compact JSON for a value that has to fit into a single cell.
/// A value that cannot be serialised yields an empty string.
pub fn jsonify(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

pub fn is_container(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}
