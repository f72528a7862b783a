//! Type system for beacon
//!
//! - Record values as read from a CRM object snapshot
//! - Property metadata describing those values

pub mod property;
pub mod value;

pub use property::{PropertyDefinition, PropertyOption, PropertyType};
pub use value::{Record, Value};
