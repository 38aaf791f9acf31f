//! Per-field state tracking and synchronous re-validation.
//!
//! All mutation happens through discrete host notifications, serialized
//! by the caller; nothing here is async or blocking.

use serde_json::Value;

use formwork_core::conditional::RequirementState;
use formwork_core::error::FormError;
use formwork_core::evaluator::evaluate;
use formwork_core::group::FieldProbe;
use formwork_core::rules::{Rule, RuleId};
use formwork_core::schema::{FieldSchema, FormSchema};

/// Live state of one form field.
#[derive(Debug, Clone)]
pub struct FieldState {
    name: String,
    initial: Value,
    value: Value,
    touched: bool,
    pristine: bool,
    forced_dirty: bool,
    violations: Vec<RuleId>,
}

impl FieldState {
    fn new(schema: &FieldSchema) -> Self {
        Self {
            name: schema.name.clone(),
            initial: schema.initial.clone(),
            value: schema.initial.clone(),
            touched: false,
            pristine: true,
            forced_dirty: false,
            violations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// No value-change event has been received since creation.
    pub fn is_pristine(&self) -> bool {
        self.pristine
    }

    /// The field has lost input focus at least once (host-reported).
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// The value differs from the initial value, or the host explicitly
    /// marked the field dirty.
    pub fn is_dirty(&self) -> bool {
        self.forced_dirty || self.value != self.initial
    }

    /// Touched or modified; gates cross-field rule reporting.
    pub fn interacted(&self) -> bool {
        self.touched || !self.pristine
    }

    /// Violated rule ids from the most recent evaluation, in rule
    /// declaration order.
    pub fn violations(&self) -> &[RuleId] {
        &self.violations
    }

    fn probe(&self) -> FieldProbe<'_> {
        FieldProbe {
            value: Some(&self.value),
            interacted: self.interacted(),
        }
    }
}

/// State of a whole form, instantiated from a [`FormSchema`].
///
/// Owns every [`FieldState`] in declaration order plus the current
/// attachment state of each conditional requirement.
#[derive(Debug)]
pub struct FormState {
    schema: FormSchema,
    fields: Vec<FieldState>,
    conditional_states: Vec<RequirementState>,
}

impl FormState {
    pub fn new(schema: FormSchema) -> Self {
        let fields: Vec<FieldState> = schema.fields.iter().map(FieldState::new).collect();
        // Attachment states are determined by the triggers' initial
        // values, same as after any later change.
        let conditional_states = schema
            .conditionals
            .iter()
            .map(|c| {
                let trigger = fields.iter().find(|f| f.name == c.trigger);
                c.state_for(trigger.map(FieldState::value))
            })
            .collect();

        let mut state = Self {
            schema,
            fields,
            conditional_states,
        };
        for i in 0..state.fields.len() {
            state.revalidate_at(i);
        }
        state
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn field(&self, path: &str) -> Result<&FieldState, FormError> {
        self.fields
            .iter()
            .find(|f| f.name == path)
            .ok_or_else(|| FormError::UnknownField(path.to_string()))
    }

    fn index_of(&self, path: &str) -> Result<usize, FormError> {
        self.fields
            .iter()
            .position(|f| f.name == path)
            .ok_or_else(|| FormError::UnknownField(path.to_string()))
    }

    /// Apply a value change: update the field, re-validate it against its
    /// effective rules, and run any conditional-requirement transitions
    /// this field triggers (re-validating their targets).
    pub fn set_value(&mut self, path: &str, value: Value) -> Result<(), FormError> {
        let index = self.index_of(path)?;
        {
            let field = &mut self.fields[index];
            field.value = value;
            field.pristine = false;
        }
        self.revalidate_at(index);

        // Each conditional bound to this trigger transitions exactly once
        // per change, as a pure function of the new value.
        for i in 0..self.schema.conditionals.len() {
            if self.schema.conditionals[i].trigger != path {
                continue;
            }
            let next = self.schema.conditionals[i].state_for(Some(&self.fields[index].value));
            if self.conditional_states[i] != next {
                self.conditional_states[i] = next;
                let target = self.schema.conditionals[i].target.clone();
                let target_index = self.index_of(&target)?;
                self.revalidate_at(target_index);
            }
        }
        Ok(())
    }

    pub fn mark_touched(&mut self, path: &str) -> Result<(), FormError> {
        let index = self.index_of(path)?;
        self.fields[index].touched = true;
        Ok(())
    }

    pub fn mark_dirty(&mut self, path: &str) -> Result<(), FormError> {
        let index = self.index_of(path)?;
        self.fields[index].forced_dirty = true;
        Ok(())
    }

    /// The field's current violated rule ids.
    pub fn violations(&self, path: &str) -> Result<&[RuleId], FormError> {
        Ok(self.field(path)?.violations())
    }

    /// Re-evaluate one field against its effective rule set and return
    /// the fresh violation list.
    pub fn revalidate(&mut self, path: &str) -> Result<&[RuleId], FormError> {
        let index = self.index_of(path)?;
        self.revalidate_at(index);
        Ok(self.fields[index].violations())
    }

    /// A group's violation set: the union of its own cross-field
    /// violations and its members' field-level violations, in declaration
    /// order with duplicates removed.
    pub fn group_violations(&self, name: &str) -> Result<Vec<RuleId>, FormError> {
        let group = self
            .schema
            .group(name)
            .ok_or_else(|| FormError::UnknownGroup(name.to_string()))?;

        let mut union = group.evaluate(|member| {
            self.fields
                .iter()
                .find(|f| f.name == member)
                .map(FieldState::probe)
        });
        for member in &group.fields {
            if let Ok(field) = self.field(member) {
                for id in field.violations() {
                    if !union.contains(id) {
                        union.push(*id);
                    }
                }
            }
        }
        Ok(union)
    }

    /// Set every field at once from a fixed record. Fields missing from
    /// the record are left untouched.
    pub fn populate(&mut self, record: &serde_json::Map<String, Value>) -> Result<(), FormError> {
        let names: Vec<String> = self.fields.iter().map(|f| f.name.clone()).collect();
        for name in names {
            if let Some(value) = record.get(&name) {
                self.set_value(&name, value.clone())?;
            }
        }
        Ok(())
    }

    /// Serialized snapshot of all current field values, in declaration
    /// order.
    pub fn snapshot(&self) -> Value {
        let map: serde_json::Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect();
        Value::Object(map)
    }

    /// Static rules plus the conditional rules currently attached to the
    /// field. Static rules keep their declaration order; attached rules
    /// follow in conditional declaration order.
    fn effective_rules(&self, path: &str) -> Vec<Rule> {
        let mut rules: Vec<Rule> = self
            .schema
            .field(path)
            .map(|f| f.rules.clone())
            .unwrap_or_default();
        for (i, conditional) in self.schema.conditionals.iter().enumerate() {
            if conditional.target == path && self.conditional_states[i] == RequirementState::Required
            {
                rules.push(conditional.rule.clone());
            }
        }
        rules
    }

    fn revalidate_at(&mut self, index: usize) {
        let name = self.fields[index].name.clone();
        let rules = self.effective_rules(&name);
        let violations = evaluate(&rules, Some(&self.fields[index].value));
        self.fields[index].violations = violations;
    }
}
