//! Enrolled subjects: named people with a reference photo.
//!
//! The recognition client downloads the roster and matches faces against the
//! reference images. Nothing here updates or deletes a subject once enrolled.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{ValidationError, image::ImagePayload};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledSubject {
  pub subject_id:      Uuid,
  pub name:            String,
  pub reference_image: ImagePayload,
  pub enrolled_at:     DateTime<Utc>,
}

impl EnrolledSubject {
  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.name.trim().is_empty() {
      return Err(ValidationError::MissingField("name"));
    }
    if self.reference_image.is_empty() {
      return Err(ValidationError::MissingField("reference_image"));
    }
    Ok(())
  }
}

/// Input for [`EnrollmentService::enroll`](crate::EnrollmentService::enroll).
///
/// Both fields are optional here so that a request missing either one can be
/// represented and rejected with a [`ValidationError`].
#[derive(Debug, Clone, Default)]
pub struct NewSubject {
  pub name:            Option<String>,
  pub reference_image: Option<ImagePayload>,
}

impl NewSubject {
  pub fn new(name: impl Into<String>, reference_image: ImagePayload) -> Self {
    Self { name: Some(name.into()), reference_image: Some(reference_image) }
  }

  pub fn into_subject(self) -> Result<EnrolledSubject, ValidationError> {
    let name = self
      .name
      .filter(|n| !n.trim().is_empty())
      .ok_or(ValidationError::MissingField("name"))?;
    let reference_image = self
      .reference_image
      .filter(|i| !i.is_empty())
      .ok_or(ValidationError::MissingField("reference_image"))?;

    Ok(EnrolledSubject {
      subject_id: Uuid::new_v4(),
      name,
      reference_image,
      enrolled_at: Utc::now(),
    })
  }
}
