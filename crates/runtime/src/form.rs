//! The host boundary.
//!
//! [`Form`] is what a form-rendering host talks to: it feeds in raw
//! value/touch/dirty notifications and reads back violation sets, message
//! text, and submit snapshots. Every mutation is applied synchronously to
//! the inner [`FormState`] and then published on the [`FormBus`] for
//! asynchronous subscribers such as the validation messenger.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use formwork_core::error::FormError;
use formwork_core::message::compose_message;
use formwork_core::rules::RuleId;
use formwork_core::schema::FormSchema;
use formwork_events::{FieldEvent, FormBus};

use crate::state::FormState;

/// A live form shared between the host and background subscribers.
///
/// Intended to be wrapped in an `Arc`. The state lock is only ever held
/// for short synchronous sections; no await happens under it.
pub struct Form {
    state: Mutex<FormState>,
    messages: Mutex<HashMap<String, String>>,
    bus: FormBus,
}

impl Form {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            state: Mutex::new(FormState::new(schema)),
            messages: Mutex::new(HashMap::new()),
            bus: FormBus::default(),
        }
    }

    /// The event stream subscribers attach to.
    pub fn bus(&self) -> &FormBus {
        &self.bus
    }

    /// Host notification: a field received a new raw value.
    pub fn on_value_change(&self, path: &str, value: Value) -> Result<(), FormError> {
        self.lock_state().set_value(path, value.clone())?;
        tracing::debug!(field = path, "Field value changed");
        self.bus.publish(FieldEvent::value_changed(path, value));
        Ok(())
    }

    /// Host notification: a field lost input focus.
    pub fn on_touched(&self, path: &str) -> Result<(), FormError> {
        self.lock_state().mark_touched(path)?;
        self.bus.publish(FieldEvent::touched(path));
        Ok(())
    }

    /// Host notification: a field should be considered dirty.
    pub fn on_dirty(&self, path: &str) -> Result<(), FormError> {
        self.lock_state().mark_dirty(path)?;
        self.bus.publish(FieldEvent::marked_dirty(path));
        Ok(())
    }

    /// The field's current violated rule ids.
    pub fn violations(&self, path: &str) -> Result<Vec<RuleId>, FormError> {
        Ok(self.lock_state().violations(path)?.to_vec())
    }

    /// A group's current violation union.
    pub fn group_violations(&self, name: &str) -> Result<Vec<RuleId>, FormError> {
        self.lock_state().group_violations(name)
    }

    /// The most recently composed message for a field; empty until a
    /// quiet period has elapsed after a change.
    pub fn message(&self, path: &str) -> String {
        self.lock_messages().get(path).cloned().unwrap_or_default()
    }

    /// Re-validate a field and recompute its display message.
    ///
    /// Called by the validation messenger once a quiet period elapses.
    /// The message is non-empty only when the field is touched or dirty
    /// and has violations; rule ids without table entries are skipped.
    pub fn refresh_message(&self, path: &str) -> Result<String, FormError> {
        let message = {
            let mut state = self.lock_state();
            let engaged = {
                let field = state.field(path)?;
                field.is_touched() || field.is_dirty()
            };
            let violations = state.revalidate(path)?.to_vec();
            if engaged {
                compose_message(&violations, &state.schema().messages)
            } else {
                String::new()
            }
        };
        self.lock_messages().insert(path.to_string(), message.clone());
        Ok(message)
    }

    /// Set every field at once from a fixed record, publishing a change
    /// event per populated field.
    pub fn populate(&self, record: &serde_json::Map<String, Value>) -> Result<(), FormError> {
        for (name, value) in record {
            match self.on_value_change(name, value.clone()) {
                Ok(()) => {}
                // Records may carry keys the schema does not declare.
                Err(FormError::UnknownField(field)) => {
                    tracing::debug!(field = %field, "Ignoring unknown field in populate record");
                }
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    /// Serialized snapshot of all current field values. The reference
    /// behavior only logs the snapshot; persistence is the host's problem.
    pub fn submit(&self) -> Value {
        let snapshot = self.lock_state().snapshot();
        tracing::info!(form = %snapshot, "Saved");
        snapshot
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn lock_messages(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::rules::Rule;
    use formwork_core::schema::FieldSchema;
    use formwork_events::FieldEventKind;
    use serde_json::json;

    fn form() -> Form {
        let schema = FormSchema::builder()
            .field(
                FieldSchema::new("firstName", json!(""))
                    .rule(Rule::Required)
                    .rule(Rule::MinLength(3)),
            )
            .message(RuleId::Required, "Please enter your first name.")
            .message(RuleId::MinLength, "The first name must be longer than 3 characters.")
            .build()
            .unwrap();
        Form::new(schema)
    }

    #[test]
    fn test_on_value_change_updates_violations() {
        let form = form();
        form.on_value_change("firstName", json!("Jo")).unwrap();
        assert_eq!(form.violations("firstName").unwrap(), vec![RuleId::MinLength]);
    }

    #[tokio::test]
    async fn test_changes_are_published_on_the_bus() {
        let form = form();
        let mut rx = form.bus().subscribe();
        form.on_value_change("firstName", json!("Jack")).unwrap();
        form.on_touched("firstName").unwrap();

        assert_eq!(
            rx.recv().await.unwrap().kind,
            FieldEventKind::ValueChanged(json!("Jack"))
        );
        assert_eq!(rx.recv().await.unwrap().kind, FieldEventKind::Touched);
    }

    #[test]
    fn test_message_empty_until_refreshed() {
        let form = form();
        form.on_value_change("firstName", json!("Jo")).unwrap();
        assert_eq!(form.message("firstName"), "");
    }

    #[test]
    fn test_refresh_message_requires_engagement() {
        let form = form();
        // Untouched, value equals initial: violations exist but stay quiet.
        assert_eq!(form.refresh_message("firstName").unwrap(), "");

        form.on_touched("firstName").unwrap();
        assert_eq!(
            form.refresh_message("firstName").unwrap(),
            "Please enter your first name."
        );
    }

    #[test]
    fn test_refresh_message_clears_after_fix() {
        let form = form();
        form.on_value_change("firstName", json!("Jo")).unwrap();
        assert_eq!(
            form.refresh_message("firstName").unwrap(),
            "The first name must be longer than 3 characters."
        );
        assert_eq!(form.message("firstName"), "The first name must be longer than 3 characters.");

        form.on_value_change("firstName", json!("Jack")).unwrap();
        assert_eq!(form.refresh_message("firstName").unwrap(), "");
        assert_eq!(form.message("firstName"), "");
    }

    #[test]
    fn test_populate_ignores_undeclared_keys() {
        let form = form();
        let record = serde_json::Map::from_iter([
            ("firstName".to_string(), json!("Jack")),
            ("notInSchema".to_string(), json!(true)),
        ]);
        form.populate(&record).unwrap();
        assert!(form.violations("firstName").unwrap().is_empty());
    }

    #[test]
    fn test_submit_returns_snapshot() {
        let form = form();
        form.on_value_change("firstName", json!("Jack")).unwrap();
        let snapshot = form.submit();
        assert_eq!(snapshot, json!({ "firstName": "Jack" }));
    }
}
