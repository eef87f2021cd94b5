//! Enrollment: register a named subject with a reference photo.

use std::sync::Arc;

use uuid::Uuid;

use crate::{Result, store::RecordStore, subject::NewSubject};

/// Registers new subjects. Names are not unique; enrolling the same name
/// twice creates two subjects.
pub struct EnrollmentService<S> {
  store: Arc<S>,
}

impl<S> Clone for EnrollmentService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: RecordStore> EnrollmentService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Validate and store `input`, returning the new subject's id.
  pub async fn enroll(&self, input: NewSubject) -> Result<Uuid> {
    let subject = input.into_subject()?;
    self.store.insert_subject(subject).await.map_err(Into::into)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    Error, ValidationError,
    image::ImagePayload,
    query::QueryFacade,
    testing::FakeStore,
  };

  #[tokio::test]
  async fn enrolled_subject_round_trips_image_bytes() {
    let store = Arc::new(FakeStore::default());
    let svc   = EnrollmentService::new(store.clone());
    let query = QueryFacade::new(store.clone());
    let bytes = vec![0x89u8, b'P', b'N', b'G', 0, 1, 2, 255];

    let before = query.subjects().await.unwrap().len();
    let id = svc
      .enroll(NewSubject::new("Bob", ImagePayload::new("image/png", bytes.clone())))
      .await
      .unwrap();

    let subjects = query.subjects().await.unwrap();
    assert_eq!(subjects.len(), before + 1);
    let bob = subjects.iter().find(|s| s.subject_id == id).unwrap();
    assert_eq!(bob.name, "Bob");
    assert_eq!(bob.reference_image.data.as_ref(), bytes.as_slice());
    assert_eq!(bob.reference_image.media_type, "image/png");
  }

  #[tokio::test]
  async fn missing_image_never_reaches_store() {
    let store = Arc::new(FakeStore::default());
    let svc   = EnrollmentService::new(store.clone());

    let err = svc
      .enroll(NewSubject { name: Some("Bob".into()), reference_image: None })
      .await
      .unwrap_err();

    assert!(matches!(
      err,
      Error::Validation(ValidationError::MissingField("reference_image"))
    ));
    assert_eq!(store.insert_calls(), 0);
    assert!(store.subjects().is_empty());
  }

  #[tokio::test]
  async fn missing_name_never_reaches_store() {
    let store = Arc::new(FakeStore::default());
    let svc   = EnrollmentService::new(store.clone());
    let photo = ImagePayload::new("image/jpeg", vec![1u8, 2, 3]);

    let err = svc
      .enroll(NewSubject { name: None, reference_image: Some(photo) })
      .await
      .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(store.insert_calls(), 0);
  }

  #[tokio::test]
  async fn duplicate_names_are_allowed() {
    let store = Arc::new(FakeStore::default());
    let svc   = EnrollmentService::new(store.clone());
    let photo = ImagePayload::new("image/jpeg", vec![1u8]);

    let a = svc.enroll(NewSubject::new("Bob", photo.clone())).await.unwrap();
    let b = svc.enroll(NewSubject::new("Bob", photo)).await.unwrap();

    assert_ne!(a, b);
    assert_eq!(store.subjects().len(), 2);
  }
}
