//! Overlap evaluation for axis-aligned rectangles.
//!
//! # Responsibility
//! - Decide whether a candidate rectangle overlaps a reference rectangle.
//!
//! # Invariants
//! - Evaluation is pure and total over `i64` inputs.

pub mod overlap;

pub use overlap::intersects;
