//! The `RecordStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `gatewatch-store-sqlite`). The services in this crate depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{event::DetectionEvent, subject::EnrolledSubject};

/// Durable home of the two record collections.
///
/// Both collections are append-only; no update or delete operation exists.
/// Implementations must reject records that fail `validate()` and must not
/// retry internally: a connectivity failure is reported to the caller as-is.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  /// Backend error. Converting it into [`crate::Error`] must map validation
  /// failures to `Validation` and everything else to `StoreUnavailable`.
  type Error: std::error::Error + Send + Sync + Into<crate::Error> + 'static;

  // ── Events ────────────────────────────────────────────────────────────

  /// Persist a detection event and return its id.
  fn insert_event(
    &self,
    event: DetectionEvent,
  ) -> impl Future<Output = Result<Uuid, Self::Error>> + Send + '_;

  /// All events, newest first by insertion order.
  fn list_events(
    &self,
  ) -> impl Future<Output = Result<Vec<DetectionEvent>, Self::Error>> + Send + '_;

  // ── Subjects ──────────────────────────────────────────────────────────

  /// Persist an enrolled subject and return its id.
  fn insert_subject(
    &self,
    subject: EnrolledSubject,
  ) -> impl Future<Output = Result<Uuid, Self::Error>> + Send + '_;

  /// All enrolled subjects. Order is backend-defined.
  fn list_subjects(
    &self,
  ) -> impl Future<Output = Result<Vec<EnrolledSubject>, Self::Error>> + Send + '_;
}
