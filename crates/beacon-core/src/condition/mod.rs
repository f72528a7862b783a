//! Targeting conditions
//!
//! A `ConditionSet` is the unit of targeting logic attached to a rule, card
//! or presentation. It holds an ordered list of `Condition`s, a combinator
//! and the `display_on_all` override.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "conditions": [
//!     {"property": "lifecyclestage", "operator": "equals", "value": "customer"},
//!     {"property": "amount", "operator": "greater_than", "value": "1000"},
//!     {"property": "industry", "operator": "is_empty"}
//!   ],
//!   "logic": "ANY",
//!   "displayOnAll": false
//! }
//! ```
//!
//! ## Supported Operators
//! - `equals` / `not_equals`
//! - `contains` / `not_contains`
//! - `starts_with` / `ends_with`
//! - `greater_than` / `less_than`
//! - `is_empty` / `is_not_empty` (no value)

mod operator;
mod types;

pub use operator::Operator;
pub use types::{Condition, ConditionSet, Logic, ResolvedCondition};
