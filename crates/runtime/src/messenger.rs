//! Debounced validation messaging.
//!
//! A [`ValidationMessenger`] subscribes to one field's change stream and
//! recomputes the field's display message only after a quiet period with
//! no further changes. Each new change cancels the pending timer and
//! starts a fresh one; only the change that survives the full quiet
//! period triggers a recomputation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use formwork_events::FieldEventKind;

use crate::form::Form;

/// Tunable parameters for the messenger.
#[derive(Debug, Clone)]
pub struct MessengerConfig {
    /// How long a field must stay unchanged before its message is
    /// recomputed.
    pub quiet_period: Duration,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(1000),
        }
    }
}

/// Handle to a spawned messenger task.
pub struct ValidationMessenger {
    handle: tokio::task::JoinHandle<()>,
}

impl ValidationMessenger {
    /// Subscribe to `form`'s bus and start debouncing changes to `field`.
    ///
    /// The task runs until `cancel` is triggered or the bus is dropped.
    pub fn spawn(
        form: Arc<Form>,
        field: impl Into<String>,
        config: MessengerConfig,
        cancel: CancellationToken,
    ) -> Self {
        let field = field.into();
        let rx = form.bus().subscribe();
        let handle = tokio::spawn(run(form, field, config, cancel, rx));
        Self { handle }
    }

    /// Wait for the task to finish after cancellation.
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

async fn run(
    form: Arc<Form>,
    field: String,
    config: MessengerConfig,
    cancel: CancellationToken,
    mut rx: tokio::sync::broadcast::Receiver<formwork_events::FieldEvent>,
) {
    let sleep = tokio::time::sleep(Duration::ZERO);
    tokio::pin!(sleep);
    // The timer is only armed while a change is pending; the `if` guard
    // keeps the elapsed sleep from being polled otherwise.
    let mut pending = false;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(field = %field, "Validation messenger shutting down");
                break;
            }
            () = &mut sleep, if pending => {
                pending = false;
                match form.refresh_message(&field) {
                    Ok(message) => {
                        tracing::debug!(field = %field, message = %message, "Validation message recomputed");
                    }
                    Err(e) => {
                        tracing::warn!(field = %field, error = %e, "Validation message recomputation failed");
                    }
                }
            }
            event = rx.recv() => match event {
                Ok(event)
                    if event.field == field
                        && matches!(event.kind, FieldEventKind::ValueChanged(_)) =>
                {
                    pending = true;
                    sleep.as_mut().reset(Instant::now() + config.quiet_period);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    // Field state is current regardless; restart the quiet
                    // period so the message catches up.
                    tracing::warn!(field = %field, skipped, "Validation messenger lagged behind the bus");
                    pending = true;
                    sleep.as_mut().reset(Instant::now() + config.quiet_period);
                }
                Err(RecvError::Closed) => break,
            }
        }
    }
}
