//! HTTP surface for rectlog.
//!
//! # Responsibility
//! - Own the router and the state injected into every handler.
//! - Keep request decoding and status mapping out of the core crate.
//!
//! # Invariants
//! - The record store is created once by the caller and shared through
//!   [`AppState`]; handlers hold no other state.
//! - Handlers run store calls inline and block their worker briefly per
//!   SQLite statement.
//! - Request bodies are not size-capped; any body gets a JSON answer.

pub mod api;
pub mod config;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use rectlog_core::{SharedRecordStore, SubmissionService};

pub use api::{ErrorBody, MessageBody, RecordView, ACCEPTED_MESSAGE};
pub use config::{ConfigError, ServerConfig};

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: SubmissionService<SharedRecordStore>,
}

impl AppState {
    pub fn new(store: SharedRecordStore) -> Self {
        Self {
            service: SubmissionService::new(store),
        }
    }
}

/// Builds the router: `POST /` submits, `GET /` lists.
///
/// axum's default 2 MiB body limit is disabled so that large submissions are
/// evaluated instead of answered with a plain-text `413`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::list_records).post(api::submit_rects))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}
