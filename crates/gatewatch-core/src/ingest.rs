//! Ingestion: persist a detection event, then hand it off for alerting.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Error, Result,
  event::NewEvent,
  notify::AlertSink,
  store::RecordStore,
};

/// Accepts detection events from recognition clients.
///
/// There is no deduplication: every call stores a new record, and every
/// stored record is handed to the alert sink, so two `"Unknown"` detections
/// in a row raise two independent alerts.
pub struct IngestionService<S> {
  store:  Arc<S>,
  alerts: Arc<dyn AlertSink>,
}

impl<S> Clone for IngestionService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), alerts: Arc::clone(&self.alerts) }
  }
}

impl<S: RecordStore> IngestionService<S> {
  pub fn new(store: Arc<S>, alerts: Arc<dyn AlertSink>) -> Self {
    Self { store, alerts }
  }

  /// Store `input` and return the new event's id.
  ///
  /// The alert hand-off happens only after the insert succeeded and does not
  /// wait for delivery. Store failures are returned before anything is
  /// handed off.
  pub async fn ingest(&self, input: NewEvent) -> Result<Uuid> {
    let event = input.into_event();
    event.validate()?;

    let id = self
      .store
      .insert_event(event.clone())
      .await
      .map_err(Into::<Error>::into)?;

    self.alerts.submit(event);
    Ok(id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    ValidationError,
    event::UNKNOWN_LABEL,
    image::ImagePayload,
    query::QueryFacade,
    testing::{FakeStore, RecordingSink},
  };

  fn service(store: &Arc<FakeStore>, sink: &Arc<RecordingSink>) -> IngestionService<FakeStore> {
    IngestionService::new(store.clone(), sink.clone())
  }

  #[tokio::test]
  async fn ingested_event_is_listed_first() {
    let store = Arc::new(FakeStore::default());
    let sink  = Arc::new(RecordingSink::default());
    let svc   = service(&store, &sink);
    let query = QueryFacade::new(store.clone());

    svc.ingest(NewEvent::new("Alice")).await.unwrap();
    let id = svc.ingest(NewEvent::new("Bob")).await.unwrap();

    let events = query.events().await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_id, id);
    assert_eq!(events[0].subject_label, "Bob");
  }

  #[tokio::test]
  async fn unknown_with_image_is_stored_and_handed_off() {
    let store = Arc::new(FakeStore::default());
    let sink  = Arc::new(RecordingSink::default());
    let photo = ImagePayload::new("image/jpeg", vec![0xffu8, 0xd8, 0x01]);

    let id = service(&store, &sink)
      .ingest(NewEvent::new(UNKNOWN_LABEL).evidence_image(photo.clone()))
      .await
      .unwrap();

    let stored = store.events();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].event_id, id);
    assert_eq!(stored[0].evidence_image.as_ref(), Some(&photo));

    let submitted = sink.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].evidence_image.as_ref(), Some(&photo));
  }

  #[tokio::test]
  async fn event_without_image_keeps_image_absent() {
    let store = Arc::new(FakeStore::default());
    let sink  = Arc::new(RecordingSink::default());

    service(&store, &sink).ingest(NewEvent::new("Alice")).await.unwrap();

    assert!(store.events()[0].evidence_image.is_none());
  }

  #[tokio::test]
  async fn repeated_unknown_creates_distinct_events_and_alerts() {
    let store = Arc::new(FakeStore::default());
    let sink  = Arc::new(RecordingSink::default());
    let svc   = service(&store, &sink);

    let a = svc.ingest(NewEvent::new(UNKNOWN_LABEL)).await.unwrap();
    let b = svc.ingest(NewEvent::new(UNKNOWN_LABEL)).await.unwrap();

    assert_ne!(a, b);
    assert_eq!(store.events().len(), 2);
    assert_eq!(sink.submitted().len(), 2);
  }

  #[tokio::test]
  async fn store_outage_is_reported_and_nothing_is_handed_off() {
    let store = Arc::new(FakeStore::unavailable());
    let sink  = Arc::new(RecordingSink::default());

    let err = service(&store, &sink)
      .ingest(NewEvent::new(UNKNOWN_LABEL))
      .await
      .unwrap_err();

    assert!(matches!(err, Error::StoreUnavailable(_)), "{err:?}");
    assert!(sink.submitted().is_empty());
  }

  #[tokio::test]
  async fn blank_label_never_reaches_store() {
    let store = Arc::new(FakeStore::default());
    let sink  = Arc::new(RecordingSink::default());

    let err = service(&store, &sink).ingest(NewEvent::new("")).await.unwrap_err();

    assert!(matches!(
      err,
      Error::Validation(ValidationError::MissingField("subject_label"))
    ));
    assert_eq!(store.insert_calls(), 0);
    assert!(sink.submitted().is_empty());
  }
}
