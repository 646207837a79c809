//! Submission use-case service.
//!
//! # Responsibility
//! - Evaluate every candidate of a submission against its reference.
//! - Persist each match as an independent record.
//! - Expose the read-all path of the record store.
//!
//! # Invariants
//! - Only candidates that intersect `main` are ever inserted.
//! - An insert failure is logged and counted; later candidates are still
//!   evaluated and inserted.
//! - The timestamp of a record is taken when its candidate is matched.

use crate::geometry::intersects;
use crate::model::record::{NewRecord, StoredRecord};
use crate::model::submission::SubmissionRequest;
use crate::repo::record_repo::{RecordRepository, RepoResult};
use log::{debug, error, info};

/// Per-submission counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    /// Candidates evaluated against `main`.
    pub evaluated: usize,
    /// Candidates that intersect `main`.
    pub matched: usize,
    /// Matches stored successfully.
    pub persisted: usize,
    /// Matches whose insert failed.
    pub failed: usize,
}

/// Use-case service wrapper for rectangle submissions.
#[derive(Debug, Clone)]
pub struct SubmissionService<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> SubmissionService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Evaluates and persists one validated submission.
    ///
    /// # Contract
    /// - Never fails: storage errors end up in `SubmissionReport::failed`.
    /// - Candidates are processed in submission order.
    pub fn submit(&self, request: &SubmissionRequest) -> SubmissionReport {
        let mut report = SubmissionReport::default();

        for (index, candidate) in request.candidates.iter().enumerate() {
            report.evaluated += 1;
            if !intersects(&request.main, candidate) {
                continue;
            }
            report.matched += 1;

            match self.repo.insert_record(&NewRecord::now(*candidate)) {
                Ok(id) => {
                    report.persisted += 1;
                    debug!(
                        "event=record_insert module=service status=ok candidate_index={} record_id={}",
                        index, id
                    );
                }
                Err(err) => {
                    report.failed += 1;
                    error!(
                        "event=record_insert module=service status=error candidate_index={} error_code=insert_failed error={}",
                        index, err
                    );
                }
            }
        }

        info!(
            "event=submission module=service status=ok evaluated={} matched={} persisted={} failed={}",
            report.evaluated, report.matched, report.persisted, report.failed
        );
        report
    }

    /// Returns every stored record.
    pub fn list_records(&self) -> RepoResult<Vec<StoredRecord>> {
        self.repo.list_records()
    }

    /// Returns the number of stored records.
    pub fn count_records(&self) -> RepoResult<u64> {
        self.repo.count_records()
    }
}
