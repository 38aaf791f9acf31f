//! Form schema: field declarations, groups, conditional requirements,
//! and the message table.
//!
//! Construction validates referential integrity and fails fast with a
//! [`SchemaError`]; a built schema is immutable and safe to evaluate
//! against indefinitely.

use serde_json::Value;

use crate::conditional::ConditionalRequirement;
use crate::error::SchemaError;
use crate::group::FieldGroup;
use crate::message::MessageTable;
use crate::rules::{Rule, RuleId};

/// One input's declaration: name, initial value, and its ordered rules.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: String,
    pub initial: Value,
    pub rules: Vec<Rule>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, initial: Value) -> Self {
        Self {
            name: name.into(),
            initial,
            rules: Vec::new(),
        }
    }

    /// Attach a rule. Declaration order is preserved and determines both
    /// evaluation order and message order.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Ordered collection of fields plus group rules, conditional
/// requirements, and display messages.
#[derive(Debug, Clone)]
pub struct FormSchema {
    pub fields: Vec<FieldSchema>,
    pub groups: Vec<FieldGroup>,
    pub conditionals: Vec<ConditionalRequirement>,
    pub messages: MessageTable,
}

impl FormSchema {
    pub fn builder() -> FormSchemaBuilder {
        FormSchemaBuilder::default()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn group(&self, name: &str) -> Option<&FieldGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}

#[derive(Debug, Default)]
pub struct FormSchemaBuilder {
    fields: Vec<FieldSchema>,
    groups: Vec<FieldGroup>,
    conditionals: Vec<ConditionalRequirement>,
    messages: MessageTable,
}

impl FormSchemaBuilder {
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn group(mut self, group: FieldGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn conditional(mut self, conditional: ConditionalRequirement) -> Self {
        self.conditionals.push(conditional);
        self
    }

    pub fn message(mut self, id: RuleId, text: impl Into<String>) -> Self {
        self.messages.insert(id, text.into());
        self
    }

    /// Validate referential integrity and produce the immutable schema.
    pub fn build(self) -> Result<FormSchema, SchemaError> {
        let mut seen = Vec::new();
        for field in &self.fields {
            if seen.contains(&field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            seen.push(&field.name);

            let mut rule_ids = Vec::new();
            for rule in &field.rules {
                let id = rule.id();
                if rule_ids.contains(&id) {
                    return Err(SchemaError::DuplicateRule {
                        field: field.name.clone(),
                        rule: id,
                    });
                }
                rule_ids.push(id);
            }
        }

        for group in &self.groups {
            if group.fields.len() < 2 {
                return Err(SchemaError::GroupTooSmall {
                    group: group.name.clone(),
                });
            }
            let mut referenced: Vec<&str> = group.fields.iter().map(String::as_str).collect();
            for rule in &group.rules {
                let (first, second) = rule.members();
                referenced.push(first);
                referenced.push(second);
            }
            for name in referenced {
                if !seen.contains(&name) {
                    return Err(SchemaError::UnknownGroupField {
                        group: group.name.clone(),
                        field: name.to_string(),
                    });
                }
            }
        }

        for conditional in &self.conditionals {
            for name in [&conditional.trigger, &conditional.target] {
                if !seen.contains(&name.as_str()) {
                    return Err(SchemaError::UnknownConditionalField(name.clone()));
                }
            }
        }

        Ok(FormSchema {
            fields: self.fields,
            groups: self.groups,
            conditionals: self.conditionals,
            messages: self.messages,
        })
    }
}
