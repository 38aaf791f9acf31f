//! Stateful form runtime for the formwork engine.
//!
//! Ties the pure logic in `formwork-core` to the event plumbing in
//! `formwork-events`:
//!
//! - [`FormState`] — per-field state tracking and synchronous
//!   re-validation on every change.
//! - [`Form`] — the host boundary: value/touch/dirty notifications in,
//!   violation sets, message text, and submit snapshots out.
//! - [`ValidationMessenger`] — debounced background task that turns
//!   violation sets into display text after a quiet period.
//! - [`signup`] — the customer signup demo schema.

pub mod form;
pub mod messenger;
pub mod signup;
pub mod state;

pub use form::Form;
pub use messenger::{MessengerConfig, ValidationMessenger};
pub use state::{FieldState, FormState};
