//! JSON REST API for Gatewatch.
//!
//! Exposes an axum [`Router`] backed by the core services over any
//! [`gatewatch_core::store::RecordStore`]. TLS, CORS and request tracing are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", gatewatch_api::api_router(state))
//! ```

pub mod error;
pub mod events;
pub mod form;
pub mod login;
pub mod subjects;

use std::sync::Arc;

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};
use gatewatch_core::{
  EnrollmentService, IngestionService, QueryFacade,
  notify::AlertSink,
  store::RecordStore,
};

pub use error::ApiError;
pub use login::LoginConfig;

/// Upper bound on request bodies; detection frames and reference photos
/// travel inline.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

// ─── Application state ────────────────────────────────────────────────────────

/// Services shared by all handlers.
pub struct ApiState<S> {
  pub ingest: IngestionService<S>,
  pub enroll: EnrollmentService<S>,
  pub query:  QueryFacade<S>,
  pub login:  Arc<LoginConfig>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      ingest: self.ingest.clone(),
      enroll: self.enroll.clone(),
      query:  self.query.clone(),
      login:  Arc::clone(&self.login),
    }
  }
}

impl<S: RecordStore> ApiState<S> {
  /// Wire every service to the same `store`, handing stored events to
  /// `alerts`.
  pub fn new(store: Arc<S>, alerts: Arc<dyn AlertSink>, login: LoginConfig) -> Self {
    Self {
      ingest: IngestionService::new(Arc::clone(&store), alerts),
      enroll: EnrollmentService::new(Arc::clone(&store)),
      query:  QueryFacade::new(store),
      login:  Arc::new(login),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type. The `log`, `logs`, `register` and `students` paths
/// accept the older request field names; their responses use the same
/// camelCase shapes as the primary routes.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    // Events
    .route("/events", get(events::list::<S>).post(events::create::<S>))
    .route("/logs", get(events::list::<S>))
    .route("/log", post(events::create::<S>))
    // Subjects
    .route("/subjects", get(subjects::list::<S>).post(subjects::create::<S>))
    .route("/students", get(subjects::list::<S>))
    .route("/register", post(subjects::create::<S>))
    // Dashboard login
    .route("/login", post(login::handler::<S>))
    .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
    .with_state(state)
}
