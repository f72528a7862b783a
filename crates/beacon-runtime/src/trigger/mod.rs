//! Glossary trigger index
//!
//! The index is a derived view over the glossary: it is rebuilt from scratch
//! whenever the glossary changes and persisted together with the entries.
//!
//! ```
//! use beacon_core::GlossaryEntry;
//! use beacon_runtime::TriggerIndexBuilder;
//!
//! let mut a = GlossaryEntry::new("ARR", "Annual recurring revenue");
//! a.meta.id = "a".to_string();
//! let mut b = GlossaryEntry::new("arr", "Average revenue rate");
//! b.meta.id = "b".to_string();
//!
//! let index = TriggerIndexBuilder::build(&[a, b], 1);
//! assert_eq!(index.term_map.get("arr").map(String::as_str), Some("b"));
//! ```

mod builder;
mod scanner;

pub use builder::{normalize_trigger, TriggerCollision, TriggerIndex, TriggerIndexBuilder};
pub use scanner::{TriggerMatch, TriggerScanner};
