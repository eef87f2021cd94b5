//! Alert delivery for Gatewatch.
//!
//! [`AlertDispatcher`] holds the policy (only `"Unknown"` detections alert,
//! and only when mail is configured), [`SmtpMailer`] delivers over SMTP, and
//! [`spawn_alert_worker`] runs deliveries in the background so ingestion
//! never waits on the mail server.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod mailer;
pub mod worker;

pub use config::MailConfig;
pub use dispatcher::AlertDispatcher;
pub use error::{Error, Result};
pub use mailer::{AlertMessage, MailTransport, SmtpMailer};
pub use worker::{AlertQueue, spawn_alert_worker};
