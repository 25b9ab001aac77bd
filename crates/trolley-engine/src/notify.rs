//! Notification sink seam.
//!
//! One-way, fire-and-forget user feedback: a severity and a human-readable
//! message, no return value, no effect on control flow. A host application
//! implements [`Notifier`] over its toast mechanism; [`TracingNotifier`]
//! routes to the log stream and [`RecordingNotifier`] captures messages for
//! assertions.

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The operation completed.
    Success,

    /// The operation was rejected or failed; cart state is unchanged.
    Error,
}

/// One-way user notification sink.
pub trait Notifier: Send + Sync {
    /// Delivers a message. Must not block and must not fail.
    fn notify(&self, severity: Severity, message: &str);

    /// Delivers a success message.
    fn success(&self, message: &str) {
        self.notify(Severity::Success, message);
    }

    /// Delivers an error message.
    fn error(&self, message: &str) {
        self.notify(Severity::Error, message);
    }
}

/// Notifier that routes messages to the `tracing` log stream.
///
/// Useful as a default when no user-facing toast mechanism is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success => info!(%message, "cart notification"),
            Severity::Error => warn!(%message, "cart notification"),
        }
    }
}

/// Notifier that records every message, for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications delivered so far, in order.
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().unwrap().clone()
    }

    /// The most recent notification, if any.
    pub fn last(&self) -> Option<(Severity, String)> {
        self.messages.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}
