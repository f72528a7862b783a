//! Operator execution modules
//!
//! Every operator resolves to a plain `bool`. Absent properties and values
//! that do not coerce degrade to the per-operator default instead of
//! raising, so a record missing a custom property never breaks targeting
//! for unrelated artifacts.

mod comparison;
mod presence;
mod text;

pub(crate) use comparison::{compare_numeric, equals};
pub(crate) use presence::is_empty;
pub(crate) use text::{contains, ends_with, starts_with};

/// Canonical string form for equality: trimmed and lowercased
pub(crate) fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
