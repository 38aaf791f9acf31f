//! Conditional requirements: rules attached to one field based on the
//! value of another.
//!
//! Modeled as an explicit two-state machine per target field rather than
//! an imperatively mutated validator list. The state is a pure function
//! of the trigger field's latest value; there is no hidden history.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rules::Rule;
use crate::types::is_absent;

/// Whether the bound rule is currently attached to the target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementState {
    Required,
    NotRequired,
}

/// Pure predicate over the trigger field's value.
#[derive(Debug, Clone)]
pub enum TriggerPredicate {
    /// True when the trigger's value equals the given value.
    ValueEquals(Value),
}

impl TriggerPredicate {
    pub fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            TriggerPredicate::ValueEquals(expected) => {
                !is_absent(value) && value == Some(expected)
            }
        }
    }
}

/// Binds a trigger field's value to a rule-attachment decision on a
/// target field.
#[derive(Debug, Clone)]
pub struct ConditionalRequirement {
    pub trigger: String,
    pub predicate: TriggerPredicate,
    pub target: String,
    pub rule: Rule,
}

impl ConditionalRequirement {
    /// Attach `rule` to `target` whenever `trigger`'s value equals `when`.
    pub fn when_equals(
        trigger: impl Into<String>,
        when: Value,
        target: impl Into<String>,
        rule: Rule,
    ) -> Self {
        Self {
            trigger: trigger.into(),
            predicate: TriggerPredicate::ValueEquals(when),
            target: target.into(),
            rule,
        }
    }

    /// The transition function: the state after a trigger-field change,
    /// fully determined by the trigger's new value.
    pub fn state_for(&self, trigger_value: Option<&Value>) -> RequirementState {
        if self.predicate.matches(trigger_value) {
            RequirementState::Required
        } else {
            RequirementState::NotRequired
        }
    }
}
