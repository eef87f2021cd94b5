//! In-memory fakes shared by the service tests.

use std::sync::{
  Mutex,
  atomic::{AtomicUsize, Ordering},
};

use thiserror::Error;
use uuid::Uuid;

use crate::{
  ValidationError,
  event::DetectionEvent,
  notify::AlertSink,
  store::RecordStore,
  subject::EnrolledSubject,
};

#[derive(Debug, Error)]
pub enum FakeError {
  #[error("invalid record: {0}")]
  Invalid(#[from] ValidationError),
  #[error("store offline")]
  Offline,
}

impl From<FakeError> for crate::Error {
  fn from(e: FakeError) -> Self {
    match e {
      FakeError::Invalid(v) => crate::Error::Validation(v),
      other => crate::Error::StoreUnavailable(Box::new(other)),
    }
  }
}

#[derive(Default)]
pub struct FakeStore {
  events:       Mutex<Vec<DetectionEvent>>,
  subjects:     Mutex<Vec<EnrolledSubject>>,
  insert_calls: AtomicUsize,
  offline:      bool,
}

impl FakeStore {
  pub fn unavailable() -> Self { Self { offline: true, ..Default::default() } }

  /// Events in insertion order.
  pub fn events(&self) -> Vec<DetectionEvent> { self.events.lock().unwrap().clone() }

  pub fn subjects(&self) -> Vec<EnrolledSubject> { self.subjects.lock().unwrap().clone() }

  pub fn insert_calls(&self) -> usize { self.insert_calls.load(Ordering::SeqCst) }

  fn check_online(&self) -> Result<(), FakeError> {
    if self.offline { Err(FakeError::Offline) } else { Ok(()) }
  }
}

impl RecordStore for FakeStore {
  type Error = FakeError;

  async fn insert_event(&self, event: DetectionEvent) -> Result<Uuid, FakeError> {
    self.insert_calls.fetch_add(1, Ordering::SeqCst);
    self.check_online()?;
    event.validate()?;
    let id = event.event_id;
    self.events.lock().unwrap().push(event);
    Ok(id)
  }

  async fn list_events(&self) -> Result<Vec<DetectionEvent>, FakeError> {
    self.check_online()?;
    Ok(self.events.lock().unwrap().iter().rev().cloned().collect())
  }

  async fn insert_subject(&self, subject: EnrolledSubject) -> Result<Uuid, FakeError> {
    self.insert_calls.fetch_add(1, Ordering::SeqCst);
    self.check_online()?;
    subject.validate()?;
    let id = subject.subject_id;
    self.subjects.lock().unwrap().push(subject);
    Ok(id)
  }

  async fn list_subjects(&self) -> Result<Vec<EnrolledSubject>, FakeError> {
    self.check_online()?;
    Ok(self.subjects())
  }
}

/// Alert sink that remembers every submitted event.
#[derive(Default)]
pub struct RecordingSink {
  submitted: Mutex<Vec<DetectionEvent>>,
}

impl RecordingSink {
  pub fn submitted(&self) -> Vec<DetectionEvent> { self.submitted.lock().unwrap().clone() }
}

impl AlertSink for RecordingSink {
  fn submit(&self, event: DetectionEvent) { self.submitted.lock().unwrap().push(event); }
}
