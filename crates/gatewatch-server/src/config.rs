//! Runtime configuration: an optional TOML file overlaid with `GATEWATCH_*`
//! environment variables.
//!
//! Nested keys use `__` in the environment, e.g. `GATEWATCH_MAIL__SMTP_HOST`.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Source};
use gatewatch_notify::MailConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                String,
  #[serde(default = "default_port")]
  pub port:                u16,
  #[serde(default = "default_store_path")]
  pub store_path:          PathBuf,
  /// Argon2 PHC string checked by `POST /api/login`.
  #[serde(default)]
  pub admin_password_hash: Option<String>,
  /// Intruder alerts are disabled when absent.
  #[serde(default)]
  pub mail:                Option<MailConfig>,
}

fn default_host() -> String { "0.0.0.0".to_owned() }

fn default_port() -> u16 { 3000 }

fn default_store_path() -> PathBuf { PathBuf::from("gatewatch.db") }

impl ServerConfig {
  /// Load from `path` (which need not exist) and the environment.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::from_source(config::File::from(path).required(false))
  }

  fn from_source<T>(file: T) -> Result<Self, ConfigError>
  where
    T: Source + Send + Sync + 'static,
  {
    Config::builder()
      .add_source(file)
      .add_source(
        Environment::with_prefix("GATEWATCH")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?
      .try_deserialize()
  }

  /// Socket address to bind, as `host:port`.
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The store path with a leading `~/` expanded.
  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use config::FileFormat;

  use super::*;

  fn parse(toml: &str) -> ServerConfig {
    ServerConfig::from_source(config::File::from_str(toml, FileFormat::Toml)).unwrap()
  }

  #[test]
  fn empty_file_uses_defaults() {
    let cfg = parse("");
    assert_eq!(cfg.address(), "0.0.0.0:3000");
    assert_eq!(cfg.store_path, PathBuf::from("gatewatch.db"));
    assert!(cfg.admin_password_hash.is_none());
    assert!(cfg.mail.is_none());
  }

  #[test]
  fn mail_table_is_read() {
    let cfg = parse(
      r#"
        port = 8080

        [mail]
        smtp_host = "smtp.example.com"
        username  = "alerts"
        password  = "hunter2"
        from      = "alerts@example.com"
        to        = "guard@example.com"
      "#,
    );
    assert_eq!(cfg.port, 8080);
    let mail = cfg.mail.unwrap();
    assert_eq!(mail.smtp_port, 587);
    assert_eq!(mail.subject, gatewatch_notify::config::DEFAULT_SUBJECT);
    assert!(mail.is_complete());
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let path = std::env::temp_dir().join("gatewatch-no-such-config.toml");
    assert!(ServerConfig::load(&path).is_ok());
  }

  #[test]
  fn paths_without_tilde_are_unchanged() {
    assert_eq!(expand_tilde(Path::new("/var/lib/gw.db")), PathBuf::from("/var/lib/gw.db"));
  }
}
