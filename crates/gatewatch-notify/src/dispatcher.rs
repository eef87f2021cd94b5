//! The alert policy: who gets an email, and what it says.

use gatewatch_core::{
  event::DetectionEvent,
  notify::{DeliveryResult, Notifier, SkipReason},
};

use crate::{
  MailConfig, Result, SmtpMailer,
  config::DEFAULT_SUBJECT,
  mailer::{AlertMessage, MailTransport},
};

/// Sends one message per `"Unknown"` detection through `T`.
///
/// Without a transport every event is skipped as
/// [`SkipReason::NotConfigured`].
pub struct AlertDispatcher<T> {
  transport: Option<T>,
  subject:   String,
}

impl<T: MailTransport> AlertDispatcher<T> {
  pub fn new(transport: T, subject: impl Into<String>) -> Self {
    Self { transport: Some(transport), subject: subject.into() }
  }

  /// A dispatcher that never sends anything.
  pub fn disabled() -> Self { Self { transport: None, subject: DEFAULT_SUBJECT.to_owned() } }

  pub fn is_enabled(&self) -> bool { self.transport.is_some() }

  /// Compose the alert for `event`. The evidence image, when present, is
  /// attached byte-for-byte.
  pub fn compose(&self, event: &DetectionEvent) -> AlertMessage {
    AlertMessage {
      subject:    self.subject.clone(),
      body:       format!(
        "Warning!\n\nAn unknown person was detected.\nTime: {}",
        event.observed_at
      ),
      attachment: event
        .evidence_image
        .as_ref()
        .map(|image| (format!("intruder.{}", image.extension()), image.clone())),
    }
  }
}

impl AlertDispatcher<SmtpMailer> {
  /// Build the SMTP-backed dispatcher from optional mail settings. Missing or
  /// incomplete settings yield a disabled dispatcher; malformed addresses are
  /// an error.
  pub fn from_config(config: Option<&MailConfig>) -> Result<Self> {
    match config {
      Some(cfg) if cfg.is_complete() => Ok(Self::new(SmtpMailer::new(cfg)?, cfg.subject.clone())),
      _ => Ok(Self::disabled()),
    }
  }
}

impl<T: MailTransport> Notifier for AlertDispatcher<T> {
  async fn notify(&self, event: &DetectionEvent) -> DeliveryResult {
    if !event.is_unknown() {
      return DeliveryResult::Skipped(SkipReason::KnownSubject);
    }
    let Some(transport) = &self.transport else {
      return DeliveryResult::Skipped(SkipReason::NotConfigured);
    };

    match transport.send(self.compose(event)).await {
      Ok(()) => DeliveryResult::Sent,
      Err(e) => DeliveryResult::Failed(e.to_string()),
    }
  }
}
