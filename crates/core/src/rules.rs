//! Validation rule and rule-identifier types.
//!
//! Rules are stateless and immutable once built. Parameter problems
//! (malformed regex, inverted range) are configuration errors and are
//! rejected at construction time.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Stable identifier for a validation rule.
///
/// Used both in violation sets and as the key for message lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    Required,
    MinLength,
    MaxLength,
    Pattern,
    Range,
    /// Cross-field equality, scoped to a field group.
    Match,
}

impl RuleId {
    /// The wire name, e.g. `"min_length"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::Required => "required",
            RuleId::MinLength => "min_length",
            RuleId::MaxLength => "max_length",
            RuleId::Pattern => "pattern",
            RuleId::Range => "range",
            RuleId::Match => "match",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-field validation rule with its parameters.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Fails on absent values (missing, null, empty string).
    Required,
    /// Fails if a present string is shorter than `n` characters.
    MinLength(usize),
    /// Fails if a present string is longer than `n` characters.
    MaxLength(usize),
    /// Fails if a present string does not match the pattern.
    Pattern(Regex),
    /// Fails if a present value is non-numeric or outside `[min, max]`.
    Range { min: f64, max: f64 },
}

impl Rule {
    /// Compile a pattern rule, failing fast on a malformed regex.
    ///
    /// `field` is only used to produce a descriptive construction error.
    pub fn pattern(field: &str, pattern: &str) -> Result<Self, SchemaError> {
        let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
            field: field.to_string(),
            source,
        })?;
        Ok(Rule::Pattern(regex))
    }

    /// Build a range rule, rejecting `min > max` at construction time.
    pub fn range(field: &str, min: f64, max: f64) -> Result<Self, SchemaError> {
        if min > max {
            return Err(SchemaError::InvalidRange {
                field: field.to_string(),
                min,
                max,
            });
        }
        Ok(Rule::Range { min, max })
    }

    /// The stable identifier for this rule.
    pub fn id(&self) -> RuleId {
        match self {
            Rule::Required => RuleId::Required,
            Rule::MinLength(_) => RuleId::MinLength,
            Rule::MaxLength(_) => RuleId::MaxLength,
            Rule::Pattern(_) => RuleId::Pattern,
            Rule::Range { .. } => RuleId::Range,
        }
    }
}
