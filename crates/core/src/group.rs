//! Cross-field rules scoped to a field group.
//!
//! A group's violation set is the union of its own cross-field violations
//! and its members' field-level violations; the runtime computes that
//! union, this module only decides whether a cross-field rule holds.

use serde_json::Value;

use crate::rules::RuleId;
use crate::types::is_absent;

/// Snapshot of one participating field, as seen by a cross-field rule.
#[derive(Debug, Clone, Copy)]
pub struct FieldProbe<'a> {
    /// The field's current value.
    pub value: Option<&'a Value>,
    /// Whether the field has been touched or modified since creation.
    pub interacted: bool,
}

/// A rule evaluated across sibling fields within a group.
#[derive(Debug, Clone)]
pub enum CrossFieldRule {
    /// The two named fields must hold equal values.
    Match { first: String, second: String },
}

impl CrossFieldRule {
    pub fn id(&self) -> RuleId {
        match self {
            CrossFieldRule::Match { .. } => RuleId::Match,
        }
    }

    /// The names of the participating fields.
    pub fn members(&self) -> (&str, &str) {
        match self {
            CrossFieldRule::Match { first, second } => (first, second),
        }
    }

    /// Whether the rule holds for the given participants.
    ///
    /// If either sibling has not been interacted with, the rule reports
    /// pass regardless of value equality, so errors never flash before
    /// the user has engaged with both fields.
    pub fn holds(&self, first: FieldProbe<'_>, second: FieldProbe<'_>) -> bool {
        match self {
            CrossFieldRule::Match { .. } => {
                if !first.interacted || !second.interacted {
                    return true;
                }
                normalized(first.value) == normalized(second.value)
            }
        }
    }
}

/// Absent values (missing, null, empty string) compare equal to each other.
fn normalized(value: Option<&Value>) -> Option<&Value> {
    if is_absent(value) {
        None
    } else {
        value
    }
}

/// Named, ordered subset of sibling fields plus the cross-field rules
/// scoped to it.
#[derive(Debug, Clone)]
pub struct FieldGroup {
    pub name: String,
    pub fields: Vec<String>,
    pub rules: Vec<CrossFieldRule>,
}

impl FieldGroup {
    /// Evaluate the group's own cross-field rules, returning the violated
    /// rule ids in declaration order. `probe` resolves a member field name
    /// to its current snapshot; unknown names count as never-interacted.
    pub fn evaluate<'a>(&self, probe: impl Fn(&str) -> Option<FieldProbe<'a>>) -> Vec<RuleId> {
        let missing = FieldProbe {
            value: None,
            interacted: false,
        };
        self.rules
            .iter()
            .filter(|rule| {
                let (first, second) = rule.members();
                let first = probe(first).unwrap_or(missing);
                let second = probe(second).unwrap_or(missing);
                !rule.holds(first, second)
            })
            .map(CrossFieldRule::id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn probe(value: &Value, interacted: bool) -> FieldProbe<'_> {
        FieldProbe {
            value: Some(value),
            interacted,
        }
    }

    fn match_rule() -> CrossFieldRule {
        CrossFieldRule::Match {
            first: "email".to_string(),
            second: "confirmEmail".to_string(),
        }
    }

    #[test]
    fn test_pristine_side_passes_regardless_of_values() {
        let a = json!("jack@torchwood.com");
        let b = json!("different@example.com");
        assert!(match_rule().holds(probe(&a, false), probe(&b, true)));
        assert!(match_rule().holds(probe(&a, true), probe(&b, false)));
        assert!(match_rule().holds(probe(&a, false), probe(&b, false)));
    }

    #[test]
    fn test_both_interacted_and_equal_passes() {
        let a = json!("jack@torchwood.com");
        let b = json!("jack@torchwood.com");
        assert!(match_rule().holds(probe(&a, true), probe(&b, true)));
    }

    #[test]
    fn test_both_interacted_and_unequal_fails() {
        let a = json!("jack@torchwood.com");
        let b = json!("ianto@torchwood.com");
        assert!(!match_rule().holds(probe(&a, true), probe(&b, true)));
    }

    #[test]
    fn test_absent_values_compare_equal() {
        let a = json!("");
        assert!(match_rule().holds(
            probe(&a, true),
            FieldProbe {
                value: None,
                interacted: true
            }
        ));
    }

    #[test]
    fn test_group_evaluate_reports_match_violation() {
        let group = FieldGroup {
            name: "emailGroup".to_string(),
            fields: vec!["email".to_string(), "confirmEmail".to_string()],
            rules: vec![match_rule()],
        };
        let a = json!("jack@torchwood.com");
        let b = json!("ianto@torchwood.com");
        let violations = group.evaluate(|name| match name {
            "email" => Some(probe(&a, true)),
            "confirmEmail" => Some(probe(&b, true)),
            _ => None,
        });
        assert_eq!(violations, vec![RuleId::Match]);
    }

    #[test]
    fn test_group_evaluate_unknown_member_passes() {
        let group = FieldGroup {
            name: "emailGroup".to_string(),
            fields: vec!["email".to_string(), "confirmEmail".to_string()],
            rules: vec![match_rule()],
        };
        let a = json!("jack@torchwood.com");
        let violations = group.evaluate(|name| match name {
            "email" => Some(probe(&a, true)),
            _ => None,
        });
        assert!(violations.is_empty());
    }
}
