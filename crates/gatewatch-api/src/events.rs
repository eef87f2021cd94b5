//! Handlers for `/events` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/events` | All events, newest first |
//! | `POST` | `/events` | Multipart: `subjectLabel`, optional `observedAt`, optional `image` file; returns 201 |

use axum::{
  Json,
  extract::{Multipart, State},
  http::StatusCode,
  response::IntoResponse,
};
use gatewatch_core::{event::{DetectionEvent, NewEvent}, store::RecordStore};
use serde::Serialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError, form::UploadForm};

const LABEL_FIELDS: &[&str] = &["subjectLabel", "subject_label", "name"];
const OBSERVED_AT_FIELDS: &[&str] = &["observedAt", "observed_at", "timestamp"];
const IMAGE_FIELDS: &[&str] = &["image", "evidenceImage", "photo"];

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /events`
pub async fn list<S>(State(state): State<ApiState<S>>) -> Result<Json<Vec<DetectionEvent>>, ApiError>
where
  S: RecordStore + 'static,
{
  Ok(Json(state.query.events().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
  pub event_id: Uuid,
}

/// `POST /events` returns 201 + `{"eventId": ...}`.
///
/// The response does not wait for the intruder alert, if one is due.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  multipart: Multipart,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
{
  let mut form = UploadForm::read(multipart).await?;

  let input = NewEvent {
    subject_label:  form.text(LABEL_FIELDS).unwrap_or_default(),
    observed_at:    form.text(OBSERVED_AT_FIELDS),
    evidence_image: form.take_file(IMAGE_FIELDS),
  };
  let label = input.subject_label.clone();

  let event_id = state.ingest.ingest(input).await?;
  tracing::info!(%event_id, %label, "detection event recorded");

  Ok((StatusCode::CREATED, Json(Created { event_id })))
}
