//! Pure validation logic for the formwork engine.
//!
//! Provides rule types, a pure-logic evaluator, cross-field group rules,
//! conditional requirements, and message composition — all synchronous and
//! free of I/O. State tracking and the event-driven runtime live in
//! `formwork-runtime`.

pub mod conditional;
pub mod error;
pub mod evaluator;
pub mod group;
pub mod message;
pub mod rules;
pub mod schema;
pub mod types;

pub use conditional::{ConditionalRequirement, RequirementState};
pub use error::{FormError, SchemaError};
pub use evaluator::evaluate;
pub use group::{CrossFieldRule, FieldGroup};
pub use message::{compose_message, MessageTable};
pub use rules::{Rule, RuleId};
pub use schema::{FieldSchema, FormSchema};
