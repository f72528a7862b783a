//! Condition set evaluation
//!
//! `MatchEvaluator` is a pure function of (condition set, record). It never
//! fails: every operator has a defined outcome for absent properties and
//! values that do not coerce.

mod operators;
mod trace;

#[cfg(test)]
mod tests;

pub use trace::ConditionTrace;

use beacon_core::{Condition, ConditionSet, Logic, Operator, Record, Rule, Targeted};
use std::cmp::{Ordering, Reverse};

pub struct MatchEvaluator;

impl MatchEvaluator {
    /// Decide whether `set` applies to `record`.
    ///
    /// `display_on_all` wins before any condition is read. `ALL` over no
    /// conditions is true, `ANY` over no conditions is false.
    pub fn evaluate(set: &ConditionSet, record: &Record) -> bool {
        if set.display_on_all {
            return true;
        }

        match set.logic {
            Logic::All => set
                .conditions
                .iter()
                .all(|c| Self::evaluate_condition(c, record)),
            Logic::Any => set
                .conditions
                .iter()
                .any(|c| Self::evaluate_condition(c, record)),
        }
    }

    /// Evaluate a single condition against a record
    pub fn evaluate_condition(condition: &Condition, record: &Record) -> bool {
        let actual = record.get(&condition.property);
        let expected = condition.value().unwrap_or_default();

        let result = match condition.operator {
            Operator::Equals => operators::equals(actual, expected),
            Operator::NotEquals => !operators::equals(actual, expected),
            Operator::Contains => operators::contains(actual, expected),
            Operator::NotContains => !operators::contains(actual, expected),
            Operator::StartsWith => operators::starts_with(actual, expected),
            Operator::EndsWith => operators::ends_with(actual, expected),
            Operator::GreaterThan => {
                operators::compare_numeric(actual, expected) == Some(Ordering::Greater)
            }
            Operator::LessThan => {
                operators::compare_numeric(actual, expected) == Some(Ordering::Less)
            }
            Operator::IsEmpty => operators::is_empty(actual),
            Operator::IsNotEmpty => !operators::is_empty(actual),
        };

        tracing::debug!(
            property = %condition.property,
            operator = %condition.operator,
            result,
            "condition evaluated"
        );
        result
    }

    /// Evaluate and record every condition actually read.
    ///
    /// Short-circuits exactly like [`MatchEvaluator::evaluate`], so the trace
    /// stops at the first failing `ALL` condition or the first passing `ANY`
    /// condition.
    pub fn evaluate_with_trace(set: &ConditionSet, record: &Record) -> (bool, Vec<ConditionTrace>) {
        if set.display_on_all {
            return (true, Vec::new());
        }

        let mut traces = Vec::new();
        for condition in &set.conditions {
            let result = Self::evaluate_condition(condition, record);
            traces.push(ConditionTrace {
                property: condition.property.clone(),
                operator: condition.operator,
                expected: condition.value().map(str::to_string),
                actual: record.get(&condition.property).cloned(),
                result,
            });

            match (set.logic, result) {
                (Logic::All, false) => return (false, traces),
                (Logic::Any, true) => return (true, traces),
                _ => {}
            }
        }

        (set.logic == Logic::All, traces)
    }

    /// Enabled artifacts whose conditions match, in input order
    pub fn select<'a, T, I>(artifacts: I, record: &Record) -> Vec<&'a T>
    where
        T: Targeted + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        artifacts
            .into_iter()
            .filter(|a| a.is_enabled() && Self::evaluate(a.conditions(), record))
            .collect()
    }

    /// Matching rules ordered by descending priority; ties keep input order
    pub fn select_rules<'a, I>(rules: I, record: &Record) -> Vec<&'a Rule>
    where
        I: IntoIterator<Item = &'a Rule>,
    {
        let mut selected = Self::select(rules, record);
        selected.sort_by_key(|r| Reverse(r.priority));
        selected
    }
}
