//! Substring, prefix and suffix tests on lowercased string forms

use beacon_core::Value;

fn lowered(actual: Option<&Value>) -> Option<String> {
    actual.and_then(Value::as_text).map(|t| t.to_lowercase())
}

pub(crate) fn contains(actual: Option<&Value>, expected: &str) -> bool {
    lowered(actual).is_some_and(|t| t.contains(&expected.to_lowercase()))
}

pub(crate) fn starts_with(actual: Option<&Value>, expected: &str) -> bool {
    lowered(actual).is_some_and(|t| t.starts_with(&expected.to_lowercase()))
}

pub(crate) fn ends_with(actual: Option<&Value>, expected: &str) -> bool {
    lowered(actual).is_some_and(|t| t.ends_with(&expected.to_lowercase()))
}
