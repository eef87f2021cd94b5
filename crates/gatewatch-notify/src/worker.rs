//! Background alert delivery.
//!
//! [`AlertQueue`] is the non-blocking hand-off given to ingestion. A single
//! worker task receives queued events and runs each delivery in its own
//! task, so a slow mail server never delays other alerts or the HTTP
//! response that queued them.

use std::sync::Arc;

use gatewatch_core::{
  event::DetectionEvent,
  notify::{AlertSink, DeliveryResult, Notifier},
};
use tokio::{sync::mpsc, task::{JoinHandle, JoinSet}};

/// Cloneable sender side of the alert worker.
#[derive(Clone)]
pub struct AlertQueue {
  tx: mpsc::UnboundedSender<DetectionEvent>,
}

impl AlertSink for AlertQueue {
  fn submit(&self, event: DetectionEvent) {
    if let Err(mpsc::error::SendError(event)) = self.tx.send(event) {
      tracing::warn!(event_id = %event.event_id, "alert worker has stopped; alert dropped");
    }
  }
}

/// Start the worker on the current tokio runtime.
///
/// The worker runs until every [`AlertQueue`] clone is dropped, then waits
/// for in-flight deliveries and exits; await the returned handle to drain
/// on shutdown.
pub fn spawn_alert_worker<N>(notifier: Arc<N>) -> (AlertQueue, JoinHandle<()>)
where
  N: Notifier + 'static,
{
  let (tx, rx) = mpsc::unbounded_channel();
  let handle = tokio::spawn(run(notifier, rx));
  (AlertQueue { tx }, handle)
}

async fn run<N>(notifier: Arc<N>, mut rx: mpsc::UnboundedReceiver<DetectionEvent>)
where
  N: Notifier + 'static,
{
  let mut in_flight = JoinSet::new();

  loop {
    tokio::select! {
      next = rx.recv() => match next {
        Some(event) => {
          let notifier = Arc::clone(&notifier);
          in_flight.spawn(async move { deliver(notifier.as_ref(), event).await });
        }
        None => break,
      },
      Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
        log_join(joined);
      }
    }
  }

  while let Some(joined) = in_flight.join_next().await {
    log_join(joined);
  }
  tracing::debug!("alert worker stopped");
}

async fn deliver<N: Notifier>(notifier: &N, event: DetectionEvent) -> DeliveryResult {
  let outcome = notifier.notify(&event).await;
  match &outcome {
    DeliveryResult::Sent => {
      tracing::info!(event_id = %event.event_id, "intruder alert sent");
    }
    DeliveryResult::Skipped(reason) => {
      tracing::debug!(event_id = %event.event_id, %reason, "alert skipped");
    }
    DeliveryResult::Failed(error) => {
      tracing::warn!(event_id = %event.event_id, %error, "alert delivery failed");
    }
  }
  outcome
}

fn log_join(joined: Result<DeliveryResult, tokio::task::JoinError>) {
  if let Err(e) = joined {
    tracing::error!(error = %e, "alert delivery task panicked");
  }
}

#[cfg(test)]
mod tests {
  use gatewatch_core::{
    event::{NewEvent, UNKNOWN_LABEL},
    image::ImagePayload,
  };

  use super::*;
  use crate::{
    AlertDispatcher,
    config::DEFAULT_SUBJECT,
    dispatcher::tests::FakeTransport,
  };

  #[tokio::test]
  async fn only_unknown_events_reach_the_transport() {
    let transport = Arc::new(FakeTransport::default());
    let dispatcher = AlertDispatcher::new(transport.clone(), DEFAULT_SUBJECT);
    let (queue, handle) = spawn_alert_worker(Arc::new(dispatcher));

    let photo = ImagePayload::new("image/jpeg", b"photo-bytes".to_vec());
    queue.submit(NewEvent::new(UNKNOWN_LABEL).evidence_image(photo.clone()).into_event());
    queue.submit(NewEvent::new("Alice").into_event());
    drop(queue);
    handle.await.unwrap();

    assert_eq!(transport.calls(), 1);
    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent[0].attachment.as_ref().unwrap().1.data, photo.data);
  }

  #[tokio::test]
  async fn repeated_unknown_events_alert_independently() {
    let transport = Arc::new(FakeTransport::default());
    let dispatcher = AlertDispatcher::new(transport.clone(), DEFAULT_SUBJECT);
    let (queue, handle) = spawn_alert_worker(Arc::new(dispatcher));

    queue.submit(NewEvent::new(UNKNOWN_LABEL).into_event());
    queue.clone().submit(NewEvent::new(UNKNOWN_LABEL).into_event());
    drop(queue);
    handle.await.unwrap();

    assert_eq!(transport.calls(), 2);
  }

  #[tokio::test]
  async fn failed_delivery_does_not_stop_the_worker() {
    let transport = Arc::new(FakeTransport::failing());
    let dispatcher = AlertDispatcher::new(transport.clone(), DEFAULT_SUBJECT);
    let (queue, handle) = spawn_alert_worker(Arc::new(dispatcher));

    queue.submit(NewEvent::new(UNKNOWN_LABEL).into_event());
    queue.submit(NewEvent::new(UNKNOWN_LABEL).into_event());
    drop(queue);
    handle.await.unwrap();

    assert_eq!(transport.calls(), 2);
  }

  #[tokio::test]
  async fn submit_after_worker_stopped_is_harmless() {
    let dispatcher = AlertDispatcher::<FakeTransport>::disabled();
    let (queue, handle) = spawn_alert_worker(Arc::new(dispatcher));
    handle.abort();
    let _ = handle.await;

    queue.submit(NewEvent::new(UNKNOWN_LABEL).into_event());
  }
}
