//! Condition operators

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operator applied between a record property and a condition value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    // Equality
    /// Equal (case and whitespace insensitive)
    Equals,
    /// Not equal
    NotEquals,

    // String operators
    /// Substring
    Contains,
    /// Not a substring
    NotContains,
    /// Prefix
    StartsWith,
    /// Suffix
    EndsWith,

    // Numeric comparison
    /// Greater than (>)
    GreaterThan,
    /// Less than (<)
    LessThan,

    // Presence
    /// Absent, null or blank
    IsEmpty,
    /// Present and not blank
    IsNotEmpty,
}

impl Operator {
    /// Every operator, in the order the authoring UI lists them
    pub const ALL: [Operator; 10] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::Contains,
        Operator::NotContains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::IsEmpty,
        Operator::IsNotEmpty,
    ];

    /// Wire name (`equals`, `greater_than`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
            Operator::IsEmpty => "is_empty",
            Operator::IsNotEmpty => "is_not_empty",
        }
    }

    /// Label shown in the condition editor
    pub fn label(&self) -> &'static str {
        match self {
            Operator::Equals => "is equal to",
            Operator::NotEquals => "is not equal to",
            Operator::Contains => "contains",
            Operator::NotContains => "does not contain",
            Operator::StartsWith => "starts with",
            Operator::EndsWith => "ends with",
            Operator::GreaterThan => "is greater than",
            Operator::LessThan => "is less than",
            Operator::IsEmpty => "is empty",
            Operator::IsNotEmpty => "is not empty",
        }
    }

    /// Returns false for the presence operators, which never read a value
    pub fn requires_value(&self) -> bool {
        !matches!(self, Operator::IsEmpty | Operator::IsNotEmpty)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s.trim())
            .ok_or_else(|| CoreError::UnknownOperator(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_wire_names() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = "between".parse::<Operator>().unwrap_err();
        assert_eq!(err, CoreError::UnknownOperator("between".to_string()));
    }

    #[test]
    fn test_requires_value() {
        assert!(Operator::Equals.requires_value());
        assert!(Operator::GreaterThan.requires_value());
        assert!(!Operator::IsEmpty.requires_value());
        assert!(!Operator::IsNotEmpty.requires_value());
    }

    #[test]
    fn test_serde_wire_name() {
        let json = serde_json::to_string(&Operator::NotContains).unwrap();
        assert_eq!(json, r#""not_contains""#);
        let op: Operator = serde_json::from_str(r#""starts_with""#).unwrap();
        assert_eq!(op, Operator::StartsWith);
    }
}
