//! Record value types
//!
//! A `Record` is the snapshot of one CRM object's properties at view time.
//! Each property holds a single scalar `Value`; a property that is missing
//! from the map is "absent", and `Value::Null` is treated the same way.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Scalar property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit null from the CRM
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value
    Number(f64),
    /// String value
    String(String),
}

impl Value {
    /// True for `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// String form used by text operators, or `None` for `Null`.
    ///
    /// Numbers use the shortest round-trip form (`5000`, `3.5`).
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Snapshot of a CRM object's properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    properties: HashMap<String, Value>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a property
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Look up a property; `Null` values are reported as absent
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name).filter(|v| !v.is_null())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl From<HashMap<String, Value>> for Record {
    fn from(properties: HashMap<String, Value>) -> Self {
        Self { properties }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let properties = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { properties }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_text_form() {
        assert_eq!(Value::Number(5000.0).as_text().unwrap(), "5000");
        assert_eq!(Value::Number(3.5).as_text().unwrap(), "3.5");
    }

    #[test]
    fn test_null_has_no_text_form() {
        assert!(Value::Null.as_text().is_none());
    }

    #[test]
    fn test_record_null_reads_as_absent() {
        let record = Record::new().with("industry", Value::Null).with("stage", "lead");
        assert!(record.get("industry").is_none());
        assert_eq!(record.get("stage"), Some(&Value::String("lead".to_string())));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_record_from_json() {
        let record: Record =
            serde_json::from_str(r#"{"amount": 5000, "closed": false, "owner": null, "stage": "lead"}"#)
                .unwrap();

        assert_eq!(record.get("amount"), Some(&Value::Number(5000.0)));
        assert_eq!(record.get("closed"), Some(&Value::Bool(false)));
        assert!(record.get("owner").is_none());
        assert_eq!(record.get("stage"), Some(&Value::from("lead")));
    }

    #[test]
    fn test_record_from_iter() {
        let record: Record = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(record.len(), 2);
    }
}
