//! Handlers for `/subjects` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/subjects` | All enrolled subjects |
//! | `POST` | `/subjects` | Multipart: `name` + `photo` file; 400 if either is missing |

use axum::{
  Json,
  extract::{Multipart, State},
  http::StatusCode,
  response::IntoResponse,
};
use gatewatch_core::{
  store::RecordStore,
  subject::{EnrolledSubject, NewSubject},
};
use serde::Serialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError, form::UploadForm};

const NAME_FIELDS: &[&str] = &["name", "studentName"];
const PHOTO_FIELDS: &[&str] = &["photo", "referenceImage", "image"];

/// `GET /subjects`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<EnrolledSubject>>, ApiError>
where
  S: RecordStore + 'static,
{
  Ok(Json(state.query.subjects().await?))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
  pub subject_id: Uuid,
}

/// `POST /subjects` returns 201 + `{"subjectId": ...}`.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  multipart: Multipart,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
{
  let mut form = UploadForm::read(multipart).await?;

  let input = NewSubject {
    name:            form.text(NAME_FIELDS),
    reference_image: form.take_file(PHOTO_FIELDS),
  };
  let name = input.name.clone().unwrap_or_default();

  let subject_id = state.enroll.enroll(input).await?;
  tracing::info!(%subject_id, %name, "subject enrolled");

  Ok((StatusCode::CREATED, Json(Created { subject_id })))
}
