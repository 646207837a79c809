//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the append/read contract of the record store.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - The store is append-only: no update or delete paths exist.
//! - Read paths return semantic errors for corrupt rows instead of
//!   masking them.

pub mod record_repo;
