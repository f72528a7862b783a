//! Evaluation trace types

use beacon_core::{Operator, Value};
use serde::Serialize;

/// Outcome of one condition as read during evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionTrace {
    pub property: String,
    pub operator: Operator,
    /// Condition value, if the operator reads one
    pub expected: Option<String>,
    /// Record value; `None` when absent or null
    pub actual: Option<Value>,
    pub result: bool,
}
