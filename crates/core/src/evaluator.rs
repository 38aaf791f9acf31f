//! Rule evaluator — pure logic, no side effects.

use serde_json::Value;

use crate::rules::{Rule, RuleId};
use crate::types::is_absent;

/// Evaluate every rule against a field's current value.
///
/// Returns the identifiers of all rules that failed, in rule-declaration
/// order. Deterministic and total: no rule evaluation can panic, and an
/// empty result means the value is valid.
pub fn evaluate(rules: &[Rule], value: Option<&Value>) -> Vec<RuleId> {
    rules
        .iter()
        .filter(|rule| violates(rule, value))
        .map(Rule::id)
        .collect()
}

fn violates(rule: &Rule, value: Option<&Value>) -> bool {
    // Only `required` treats absence as a failure; every other rule
    // short-circuits to pass on an absent value.
    if is_absent(value) {
        return matches!(rule, Rule::Required);
    }
    let Some(value) = value else {
        // A missing value is absent and was handled above.
        return false;
    };

    match rule {
        Rule::Required => false,
        Rule::MinLength(min) => string_len(value).is_some_and(|len| len < *min),
        Rule::MaxLength(max) => string_len(value).is_some_and(|len| len > *max),
        Rule::Pattern(regex) => value.as_str().is_some_and(|s| !regex.is_match(s)),
        Rule::Range { min, max } => match numeric(value) {
            Some(n) => n < *min || n > *max,
            None => true,
        },
    }
}

/// Character count of a string value. Non-strings have no length and pass
/// the length rules.
fn string_len(value: &Value) -> Option<usize> {
    value.as_str().map(|s| s.chars().count())
}

/// Numeric interpretation of a value. Form hosts deliver numbers as
/// strings, so numeric strings are accepted alongside JSON numbers.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
