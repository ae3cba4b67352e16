use serde_json::Value;

/// "Has meaningful content" gate applied before any field joins a submission.
///
/// - `null` → false
/// - strings → trimmed length > 0
/// - arrays → non-empty
/// - objects → at least one key
/// - numbers and booleans → always true (`0` and `false` are real answers)
pub fn is_valid(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => has_text(s),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Number(_) | Value::Bool(_) => true,
    }
}

/// `is_valid` for a plain string.
pub fn has_text(s: &str) -> bool {
    !s.trim().is_empty()
}
