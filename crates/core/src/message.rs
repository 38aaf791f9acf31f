//! Mapping from violated rules to user-facing message text.

use std::collections::HashMap;

use crate::rules::RuleId;

/// Lookup table from rule id to display text.
pub type MessageTable = HashMap<RuleId, String>;

/// Join the messages for the violated rules, in violation order, with a
/// single space. Rule ids absent from the table are skipped silently; no
/// violations (or no matching messages) yield the empty string.
pub fn compose_message(violations: &[RuleId], table: &MessageTable) -> String {
    violations
        .iter()
        .filter_map(|id| table.get(id).map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
