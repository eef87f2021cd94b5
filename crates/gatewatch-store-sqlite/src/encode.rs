//! Encoding and decoding helpers between Rust domain types and the plain
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and UUIDs as hyphenated
//! lowercase strings. Image bytes go into a `BLOB` column next to a `TEXT`
//! media type.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use gatewatch_core::{
  event::DetectionEvent,
  image::ImagePayload,
  subject::EnrolledSubject,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── ImagePayload ─────────────────────────────────────────────────────────────

/// Split a payload into its `(image_data, content_type)` columns.
pub fn encode_image(image: Option<&ImagePayload>) -> (Option<Vec<u8>>, Option<String>) {
  match image {
    Some(i) => (Some(i.data.to_vec()), Some(i.media_type.clone())),
    None => (None, None),
  }
}

pub fn decode_image(data: Option<Vec<u8>>, content_type: Option<String>) -> Option<ImagePayload> {
  match (data, content_type) {
    (Some(data), Some(ct)) => Some(ImagePayload::new(ct, Bytes::from(data))),
    _ => None,
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `events` row.
pub struct RawEvent {
  pub event_id:      String,
  pub subject_label: String,
  pub observed_at:   String,
  pub image_data:    Option<Vec<u8>>,
  pub content_type:  Option<String>,
  pub recorded_at:   String,
}

impl RawEvent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      event_id:      row.get(0)?,
      subject_label: row.get(1)?,
      observed_at:   row.get(2)?,
      image_data:    row.get(3)?,
      content_type:  row.get(4)?,
      recorded_at:   row.get(5)?,
    })
  }

  pub fn into_event(self) -> Result<DetectionEvent> {
    Ok(DetectionEvent {
      event_id:       decode_uuid(&self.event_id)?,
      subject_label:  self.subject_label,
      observed_at:    self.observed_at,
      evidence_image: decode_image(self.image_data, self.content_type),
      recorded_at:    decode_dt(&self.recorded_at)?,
    })
  }
}

/// Raw values read directly from a `subjects` row.
pub struct RawSubject {
  pub subject_id:   String,
  pub name:         String,
  pub image_data:   Vec<u8>,
  pub content_type: String,
  pub enrolled_at:  String,
}

impl RawSubject {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      subject_id:   row.get(0)?,
      name:         row.get(1)?,
      image_data:   row.get(2)?,
      content_type: row.get(3)?,
      enrolled_at:  row.get(4)?,
    })
  }

  pub fn into_subject(self) -> Result<EnrolledSubject> {
    Ok(EnrolledSubject {
      subject_id:      decode_uuid(&self.subject_id)?,
      name:            self.name,
      reference_image: ImagePayload::new(self.content_type, Bytes::from(self.image_data)),
      enrolled_at:     decode_dt(&self.enrolled_at)?,
    })
  }
}
