//! Storage keys
//!
//! These names are shared with the page-overlay engine that reads the same
//! store, so they must not change.

pub const RULES: &str = "rules";
pub const CARDS: &str = "cards";
pub const PRESENTATIONS: &str = "presentations";
pub const GLOSSARY_ENTRIES: &str = "glossaryEntries";
pub const TERM_TRIGGER_INDEX: &str = "termTriggerIndex";
pub const ENTRIES_BY_ID: &str = "entriesById";
pub const TRIGGER_INDEX_VERSION: &str = "termTriggerIndexVersion";
pub const SETTINGS: &str = "settings";
