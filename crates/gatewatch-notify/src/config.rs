//! Mail settings, deserialised from the `[mail]` table of the server config.

use std::fmt;

use serde::Deserialize;

pub const DEFAULT_SUBJECT: &str = "SECURITY ALERT: Intruder Detected";

#[derive(Clone, Deserialize)]
pub struct MailConfig {
  pub smtp_host: String,
  #[serde(default = "default_smtp_port")]
  pub smtp_port: u16,
  #[serde(default)]
  pub username:  String,
  #[serde(default)]
  pub password:  String,
  /// Sender address, e.g. `Gatewatch <alerts@example.com>`.
  #[serde(default)]
  pub from:      String,
  /// Destination address for intruder alerts.
  #[serde(default)]
  pub to:        String,
  #[serde(default = "default_subject")]
  pub subject:   String,
}

fn default_smtp_port() -> u16 { 587 }

fn default_subject() -> String { DEFAULT_SUBJECT.to_owned() }

impl MailConfig {
  /// Whether every setting needed to send a message is present.
  pub fn is_complete(&self) -> bool {
    [&self.smtp_host, &self.username, &self.password, &self.from, &self.to]
      .iter()
      .all(|v| !v.trim().is_empty())
  }
}

impl fmt::Debug for MailConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MailConfig")
      .field("smtp_host", &self.smtp_host)
      .field("smtp_port", &self.smtp_port)
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .field("from", &self.from)
      .field("to", &self.to)
      .field("subject", &self.subject)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn complete() -> MailConfig {
    MailConfig {
      smtp_host: "smtp.example.com".into(),
      smtp_port: 587,
      username:  "alerts@example.com".into(),
      password:  "app-password".into(),
      from:      "alerts@example.com".into(),
      to:        "guard@example.com".into(),
      subject:   DEFAULT_SUBJECT.into(),
    }
  }

  #[test]
  fn complete_config_is_complete() {
    assert!(complete().is_complete());
  }

  #[test]
  fn blank_password_is_incomplete() {
    let cfg = MailConfig { password: "  ".into(), ..complete() };
    assert!(!cfg.is_complete());
  }

  #[test]
  fn debug_hides_password() {
    let dbg = format!("{:?}", complete());
    assert!(!dbg.contains("app-password"), "{dbg}");
  }
}
