//! Alerting seams: the delivery policy ([`Notifier`]) and the fire-and-forget
//! hand-off used by ingestion ([`AlertSink`]).

use std::{fmt, future::Future};

use crate::event::DetectionEvent;

/// Why no alert was sent for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// The event names an enrolled subject.
  KnownSubject,
  /// No mail destination or credentials are configured.
  NotConfigured,
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::KnownSubject => f.write_str("known subject"),
      Self::NotConfigured => f.write_str("alerts not configured"),
    }
  }
}

/// Outcome of a single delivery attempt. Never an error: a failed delivery
/// must not affect the event it was raised for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
  Sent,
  Skipped(SkipReason),
  Failed(String),
}

/// Decides whether an event warrants an alert and delivers it.
pub trait Notifier: Send + Sync {
  fn notify<'a>(
    &'a self,
    event: &'a DetectionEvent,
  ) -> impl Future<Output = DeliveryResult> + Send + 'a;
}

/// Receives stored events for alerting without making the caller wait.
///
/// `submit` must return promptly; delivery happens elsewhere.
pub trait AlertSink: Send + Sync {
  fn submit(&self, event: DetectionEvent);
}

