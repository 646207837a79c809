//! Domain model for rectangle submissions and persisted matches.
//!
//! # Responsibility
//! - Define the geometry value type used by the overlap evaluator.
//! - Define wire-facing input shapes and their validation into domain types.
//! - Define the record shape owned by the record store.
//!
//! # Invariants
//! - Rectangle fields are mandatory; absence is never defaulted to zero.
//! - Stored records are immutable once created.

pub mod rect;
pub mod record;
pub mod submission;
