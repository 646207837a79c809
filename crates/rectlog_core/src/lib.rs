//! Core domain logic for rectlog.
//! Owns the overlap predicate, the record store, and the submission use case.

pub mod db;
pub mod geometry;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use geometry::intersects;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{NewRecord, StoredRecord};
pub use model::rect::{Rect, RectField, RectInput, RectValidationError};
pub use model::submission::{SubmissionError, SubmissionInput, SubmissionRequest};
pub use repo::record_repo::{
    RecordRepository, RepoError, RepoResult, SharedRecordStore, SqliteRecordRepository,
};
pub use service::submission_service::{SubmissionReport, SubmissionService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
