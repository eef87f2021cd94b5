//! Outgoing mail: the [`MailTransport`] seam and its SMTP implementation.

use std::{future::Future, sync::Arc};

use gatewatch_core::image::ImagePayload;
use lettre::{
  AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
  message::{Attachment, Mailbox, MultiPart, SinglePart, header::ContentType},
  transport::smtp::authentication::Credentials,
};

use crate::{Error, MailConfig, Result};

/// A fully composed alert, independent of the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
  pub subject:    String,
  pub body:       String,
  /// `(file name, image)` attached to the message, if any.
  pub attachment: Option<(String, ImagePayload)>,
}

/// Delivers composed alerts. Sender and recipient are fixed by the
/// implementation.
pub trait MailTransport: Send + Sync {
  fn send(&self, message: AlertMessage) -> impl Future<Output = Result<()>> + Send + '_;
}

impl<T: MailTransport> MailTransport for Arc<T> {
  fn send(&self, message: AlertMessage) -> impl Future<Output = Result<()>> + Send + '_ {
    (**self).send(message)
  }
}

// ─── SMTP ────────────────────────────────────────────────────────────────────

/// SMTP delivery via STARTTLS with username/password authentication.
pub struct SmtpMailer {
  transport: AsyncSmtpTransport<Tokio1Executor>,
  from:      Mailbox,
  to:        Mailbox,
}

impl SmtpMailer {
  /// Build a mailer from `config`. Addresses are parsed up front so a typo
  /// fails at startup rather than on the first alert.
  pub fn new(config: &MailConfig) -> Result<Self> {
    let from: Mailbox = config.from.parse()?;
    let to: Mailbox = config.to.parse()?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
      .port(config.smtp_port)
      .credentials(Credentials::new(
        config.username.clone(),
        config.password.clone(),
      ))
      .build();

    Ok(Self { transport, from, to })
  }
}

impl MailTransport for SmtpMailer {
  async fn send(&self, message: AlertMessage) -> Result<()> {
    let email = compose(self.from.clone(), self.to.clone(), message)?;
    self.transport.send(email).await?;
    Ok(())
  }
}

/// Turn an [`AlertMessage`] into a MIME message: plain text alone, or
/// `multipart/mixed` with the image attached.
pub(crate) fn compose(from: Mailbox, to: Mailbox, message: AlertMessage) -> Result<Message> {
  let builder = Message::builder()
    .from(from)
    .to(to)
    .subject(message.subject);

  let email = match message.attachment {
    None => builder.header(ContentType::TEXT_PLAIN).body(message.body)?,
    Some((filename, image)) => {
      let content_type = ContentType::parse(&image.media_type)
        .map_err(|e| Error::ContentType(format!("{}: {e}", image.media_type)))?;
      builder.multipart(
        MultiPart::mixed()
          .singlepart(SinglePart::plain(message.body))
          .singlepart(Attachment::new(filename).body(image.data.to_vec(), content_type)),
      )?
    }
  };
  Ok(email)
}
