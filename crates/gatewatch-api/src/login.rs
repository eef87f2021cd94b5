//! Handler for `POST /login`: the dashboard's shared-password check.
//!
//! The check answers yes or no and issues nothing; it does not guard any
//! other route.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{Json, extract::State, http::StatusCode};
use gatewatch_core::store::RecordStore;
use serde::{Deserialize, Serialize};

use crate::ApiState;

/// Password accepted by the login check.
#[derive(Clone, Default)]
pub struct LoginConfig {
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`. When `None`
  /// every login attempt fails.
  pub password_hash: Option<String>,
}

impl LoginConfig {
  pub fn verify(&self, password: &str) -> bool {
    let Some(hash) = self.password_hash.as_deref() else { return false };
    let Ok(parsed) = PasswordHash::new(hash) else {
      tracing::warn!("configured admin password hash is not a valid PHC string");
      return false;
    };
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .is_ok()
  }
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  /// Absent is treated as a wrong password.
  #[serde(default)]
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<&'static str>,
}

/// `POST /login`, body: `{"password":"..."}`
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<LoginBody>,
) -> (StatusCode, Json<LoginResponse>)
where
  S: RecordStore + 'static,
{
  if state.login.verify(&body.password) {
    (StatusCode::OK, Json(LoginResponse { success: true, message: None }))
  } else {
    tracing::info!("rejected dashboard login");
    (
      StatusCode::UNAUTHORIZED,
      Json(LoginResponse { success: false, message: Some("Invalid Password") }),
    )
  }
}
