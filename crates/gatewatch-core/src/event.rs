//! Detection events: one record per observation made by a recognition
//! client.
//!
//! Events are append-only: once stored they are never updated or deleted.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{ValidationError, image::ImagePayload};

/// Label sent by recognition clients for a face that matched nobody.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// `strftime` format for server-assigned `observed_at` values.
pub const OBSERVED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A stored detection event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionEvent {
  pub event_id:       Uuid,
  /// Name of an enrolled subject, or [`UNKNOWN_LABEL`].
  pub subject_label:  String,
  /// Client-supplied observation time, kept verbatim.
  pub observed_at:    String,
  pub evidence_image: Option<ImagePayload>,
  /// Server-assigned insertion time.
  pub recorded_at:    DateTime<Utc>,
}

impl DetectionEvent {
  pub fn is_unknown(&self) -> bool { self.subject_label == UNKNOWN_LABEL }

  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.subject_label.trim().is_empty() {
      return Err(ValidationError::MissingField("subject_label"));
    }
    Ok(())
  }
}

/// Input for [`IngestionService::ingest`](crate::IngestionService::ingest).
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
  pub subject_label:  String,
  pub observed_at:    Option<String>,
  pub evidence_image: Option<ImagePayload>,
}

impl NewEvent {
  pub fn new(subject_label: impl Into<String>) -> Self {
    Self { subject_label: subject_label.into(), ..Default::default() }
  }

  pub fn observed_at(mut self, observed_at: impl Into<String>) -> Self {
    self.observed_at = Some(observed_at.into());
    self
  }

  pub fn evidence_image(mut self, image: ImagePayload) -> Self {
    self.evidence_image = Some(image);
    self
  }

  /// Turn the input into a storable record, assigning a fresh id, the
  /// insertion time and, when the client sent none, the observation time.
  pub fn into_event(self) -> DetectionEvent {
    let observed_at = self
      .observed_at
      .filter(|s| !s.trim().is_empty())
      .unwrap_or_else(|| Local::now().format(OBSERVED_AT_FORMAT).to_string());

    DetectionEvent {
      event_id: Uuid::new_v4(),
      subject_label: self.subject_label,
      observed_at,
      evidence_image: self.evidence_image,
      recorded_at: Utc::now(),
    }
  }
}
