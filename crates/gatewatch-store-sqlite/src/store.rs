//! [`SqliteStore`]: the SQLite implementation of [`RecordStore`].

use std::path::Path;

use gatewatch_core::{
  event::DetectionEvent,
  store::RecordStore,
  subject::EnrolledSubject,
};
use uuid::Uuid;

use crate::{
  Result,
  encode::{RawEvent, RawSubject, encode_dt, encode_image, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Gatewatch record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  // ── Events ────────────────────────────────────────────────────────────────

  async fn insert_event(&self, event: DetectionEvent) -> Result<Uuid> {
    event.validate()?;

    let id                  = event.event_id;
    let id_str              = encode_uuid(id);
    let recorded_at_str     = encode_dt(event.recorded_at);
    let (image, media_type) = encode_image(event.evidence_image.as_ref());
    let DetectionEvent { subject_label, observed_at, .. } = event;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (
             event_id, subject_label, observed_at, image_data, content_type, recorded_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            id_str,
            subject_label,
            observed_at,
            image,
            media_type,
            recorded_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(id)
  }

  async fn list_events(&self) -> Result<Vec<DetectionEvent>> {
    let raws: Vec<RawEvent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT event_id, subject_label, observed_at, image_data, content_type, recorded_at
           FROM events
           ORDER BY seq DESC",
        )?;
        let rows = stmt
          .query_map([], RawEvent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  async fn insert_subject(&self, subject: EnrolledSubject) -> Result<Uuid> {
    subject.validate()?;

    let id              = subject.subject_id;
    let id_str          = encode_uuid(id);
    let enrolled_at_str = encode_dt(subject.enrolled_at);
    let image           = subject.reference_image.data.to_vec();
    let EnrolledSubject { name, reference_image, .. } = subject;
    let media_type      = reference_image.media_type;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO subjects (subject_id, name, image_data, content_type, enrolled_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, image, media_type, enrolled_at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(id)
  }

  async fn list_subjects(&self) -> Result<Vec<EnrolledSubject>> {
    let raws: Vec<RawSubject> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT subject_id, name, image_data, content_type, enrolled_at
           FROM subjects
           ORDER BY seq ASC",
        )?;
        let rows = stmt
          .query_map([], RawSubject::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubject::into_subject).collect()
  }
}
