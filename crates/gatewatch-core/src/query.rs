//! Read-only listings for the dashboard. No paging, no filters, no push:
//! consumers poll and receive the full collection each time.

use std::sync::Arc;

use crate::{
  Result,
  event::DetectionEvent,
  store::RecordStore,
  subject::EnrolledSubject,
};

pub struct QueryFacade<S> {
  store: Arc<S>,
}

impl<S> Clone for QueryFacade<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: RecordStore> QueryFacade<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Every detection event, newest first.
  pub async fn events(&self) -> Result<Vec<DetectionEvent>> {
    self.store.list_events().await.map_err(Into::into)
  }

  /// Every enrolled subject.
  pub async fn subjects(&self) -> Result<Vec<EnrolledSubject>> {
    self.store.list_subjects().await.map_err(Into::into)
  }
}
