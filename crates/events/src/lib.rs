//! Field-change event plumbing for the formwork engine.
//!
//! - [`FormBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`FieldEvent`] — the canonical field-change envelope the host feeds
//!   in and the validation messenger subscribes to.

pub mod bus;

pub use bus::{FieldEvent, FieldEventKind, FormBus};
