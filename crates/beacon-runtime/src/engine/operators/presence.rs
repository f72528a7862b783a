//! Presence tests

use beacon_core::Value;

/// Absent, null, or a string that is blank after trimming
pub(crate) fn is_empty(actual: Option<&Value>) -> bool {
    match actual {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Number(_)) | Some(Value::Bool(_)) => false,
    }
}
