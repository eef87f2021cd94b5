//! Core types, services and trait definitions for the Gatewatch access log.
//!
//! This crate has no HTTP, database or mail dependencies.
//! Storage backends implement [`store::RecordStore`]; alert delivery plugs in
//! through [`notify::AlertSink`] and [`notify::Notifier`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod enroll;
pub mod error;
pub mod event;
pub mod image;
pub mod ingest;
pub mod notify;
pub mod query;
pub mod store;
pub mod subject;

pub use enroll::EnrollmentService;
pub use error::{Error, Result, ValidationError};
pub use ingest::IngestionService;
pub use query::QueryFacade;

#[cfg(test)]
mod testing;
