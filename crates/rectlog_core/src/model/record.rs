//! Persisted match record model.
//!
//! # Responsibility
//! - Define the insert payload created at evaluation time.
//! - Define the read model returned by the record store.
//!
//! # Invariants
//! - `time` is assigned by the system at creation, never by the caller.
//! - `id`, `created_at`, `updated_at` are assigned by storage.

use crate::model::rect::Rect;
use chrono::{DateTime, Utc};

/// Insert payload for one matched candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRecord {
    pub time: DateTime<Utc>,
    pub rect: Rect,
}

impl NewRecord {
    /// Stamps `rect` with the current UTC time.
    pub fn now(rect: Rect) -> Self {
        Self::at(Utc::now(), rect)
    }

    pub fn at(time: DateTime<Utc>, rect: Rect) -> Self {
        Self { time, rect }
    }
}

/// One row of the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Storage-generated identity.
    pub id: i64,
    /// Moment the candidate was matched.
    pub time: DateTime<Utc>,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    /// Unix epoch milliseconds, set by storage on insert.
    pub created_at: i64,
    /// Unix epoch milliseconds. Equal to `created_at`; rows are never updated.
    pub updated_at: i64,
}

impl StoredRecord {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
