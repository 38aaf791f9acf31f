use crate::rules::RuleId;

/// Configuration errors detected while building a schema.
///
/// These fail fast at construction time; they never surface from
/// `evaluate` calls.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid range for field '{field}': min {min} is greater than max {max}")]
    InvalidRange { field: String, min: f64, max: f64 },

    #[error("Duplicate field '{0}' in schema")]
    DuplicateField(String),

    #[error("Duplicate rule '{rule}' on field '{field}'")]
    DuplicateRule { field: String, rule: RuleId },

    #[error("Group '{group}' references unknown field '{field}'")]
    UnknownGroupField { group: String, field: String },

    #[error("Conditional requirement references unknown field '{0}'")]
    UnknownConditionalField(String),

    #[error("Group '{group}' needs at least two member fields")]
    GroupTooSmall { group: String },
}

/// Runtime errors at the host boundary.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown group: {0}")]
    UnknownGroup(String),
}
