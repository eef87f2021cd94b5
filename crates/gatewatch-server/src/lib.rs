//! Process wiring for the Gatewatch server: configuration, the alert worker
//! and the outer HTTP router.

pub mod config;

pub use self::config::ServerConfig;

use std::sync::Arc;

use axum::{Router, routing::get};
use gatewatch_api::{ApiState, LoginConfig, api_router};
use gatewatch_core::store::RecordStore;
use gatewatch_notify::{AlertDispatcher, MailTransport, spawn_alert_worker};
use tokio::task::JoinHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

const LIVENESS: &str = "Gatewatch API is running";

/// Build the handler state over `store`, starting the alert worker that
/// delivers through `dispatcher`.
///
/// The worker stops once every clone of the returned state is dropped; await
/// the handle afterwards to let in-flight alerts finish.
pub fn start<S, T>(
  store: Arc<S>,
  dispatcher: AlertDispatcher<T>,
  login: LoginConfig,
) -> (ApiState<S>, JoinHandle<()>)
where
  S: RecordStore + 'static,
  T: MailTransport + 'static,
{
  let (queue, worker) = spawn_alert_worker(Arc::new(dispatcher));
  (ApiState::new(store, Arc::new(queue), login), worker)
}

/// The complete application: liveness at `/`, the API under `/api`.
pub fn router<S>(state: ApiState<S>) -> Router
where
  S: RecordStore + 'static,
{
  Router::new()
    .route("/", get(|| async { LIVENESS }))
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}
