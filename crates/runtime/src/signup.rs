//! The customer signup demo schema.
//!
//! The reference form this engine was built around: name and email
//! fields with static rules, an email-confirmation group, and a phone
//! number that becomes required when the customer asks to be notified by
//! text message.

use serde_json::{json, Map, Value};

use formwork_core::conditional::ConditionalRequirement;
use formwork_core::error::SchemaError;
use formwork_core::group::{CrossFieldRule, FieldGroup};
use formwork_core::rules::{Rule, RuleId};
use formwork_core::schema::{FieldSchema, FormSchema};

/// Pattern for a plausible email address; intentionally simple.
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

/// Build the customer signup schema.
pub fn signup_schema() -> Result<FormSchema, SchemaError> {
    FormSchema::builder()
        .field(
            FieldSchema::new("firstName", json!(""))
                .rule(Rule::Required)
                .rule(Rule::MinLength(3)),
        )
        .field(
            FieldSchema::new("lastName", json!(""))
                .rule(Rule::Required)
                .rule(Rule::MaxLength(50)),
        )
        .field(
            FieldSchema::new("email", json!(""))
                .rule(Rule::Required)
                .rule(Rule::pattern("email", EMAIL_PATTERN)?),
        )
        .field(FieldSchema::new("confirmEmail", json!("")))
        .field(FieldSchema::new("notifyBy", json!("email")))
        .field(FieldSchema::new("phone", json!("")))
        .field(FieldSchema::new("sendCatalog", json!(true)))
        .group(FieldGroup {
            name: "emailGroup".to_string(),
            fields: vec!["email".to_string(), "confirmEmail".to_string()],
            rules: vec![CrossFieldRule::Match {
                first: "email".to_string(),
                second: "confirmEmail".to_string(),
            }],
        })
        .conditional(ConditionalRequirement::when_equals(
            "notifyBy",
            json!("text"),
            "phone",
            Rule::Required,
        ))
        .message(RuleId::Required, "Please enter a value.")
        .message(RuleId::MinLength, "The value is too short.")
        .message(RuleId::MaxLength, "The value is too long.")
        .message(RuleId::Pattern, "Please enter a valid email address.")
        .message(RuleId::Match, "The confirmation does not match.")
        .build()
}

/// The fixed record the host's "populate test data" action applies.
pub fn test_record() -> Map<String, Value> {
    Map::from_iter([
        ("firstName".to_string(), json!("Jack")),
        ("lastName".to_string(), json!("Harkness")),
        ("email".to_string(), json!("jack@torchwood.com")),
        ("sendCatalog".to_string(), json!(false)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FormState;

    #[test]
    fn test_schema_builds() {
        let schema = signup_schema().unwrap();
        assert_eq!(schema.fields.len(), 7);
        assert!(schema.group("emailGroup").is_some());
    }

    #[test]
    fn test_first_name_length_property() {
        let mut state = FormState::new(signup_schema().unwrap());
        state.set_value("firstName", json!("Jo")).unwrap();
        assert_eq!(state.violations("firstName").unwrap(), &[RuleId::MinLength]);
        state.set_value("firstName", json!("Jack")).unwrap();
        assert!(state.violations("firstName").unwrap().is_empty());
    }

    #[test]
    fn test_email_pattern_accepts_fixture_address() {
        let mut state = FormState::new(signup_schema().unwrap());
        state.set_value("email", json!("jack@torchwood.com")).unwrap();
        assert!(state.violations("email").unwrap().is_empty());
        state.set_value("email", json!("not an email")).unwrap();
        assert_eq!(state.violations("email").unwrap(), &[RuleId::Pattern]);
    }

    #[test]
    fn test_fixture_record_is_valid() {
        let mut state = FormState::new(signup_schema().unwrap());
        state.populate(&test_record()).unwrap();
        for field in ["firstName", "lastName", "email", "sendCatalog"] {
            assert!(
                state.violations(field).unwrap().is_empty(),
                "unexpected violations on {field}"
            );
        }
    }
}
