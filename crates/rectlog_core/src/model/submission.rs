//! Submission input and its validated form.
//!
//! # Responsibility
//! - Mirror the submission body with nullable fields so absence is visible.
//! - Validate into a [`SubmissionRequest`] holding only complete rectangles.
//!
//! # Invariants
//! - `main` and `input` are both mandatory; `input` may be empty.
//! - A `null` entry inside `input` is rejected, not skipped.
//! - Candidate order is preserved.

use crate::model::rect::{Rect, RectInput, RectValidationError};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw submission body as decoded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionInput {
    pub main: Option<RectInput>,
    pub input: Option<Vec<Option<RectInput>>>,
}

/// Validated submission: one reference rectangle and ordered candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub main: Rect,
    pub candidates: Vec<Rect>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    MissingMain,
    MissingInput,
    InvalidMain(RectValidationError),
    NullCandidate { index: usize },
    InvalidCandidate {
        index: usize,
        source: RectValidationError,
    },
}

impl Display for SubmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingMain => write!(f, "field `main` is required"),
            Self::MissingInput => write!(f, "field `input` is required"),
            Self::InvalidMain(err) => write!(f, "main: {err}"),
            Self::NullCandidate { index } => write!(f, "input[{index}]: rectangle is required"),
            Self::InvalidCandidate { index, source } => write!(f, "input[{index}]: {source}"),
        }
    }
}

impl Error for SubmissionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidMain(err) => Some(err),
            Self::InvalidCandidate { source, .. } => Some(source),
            Self::MissingMain | Self::MissingInput | Self::NullCandidate { .. } => None,
        }
    }
}

impl SubmissionInput {
    /// Validates every mandatory field, stopping at the first failure.
    pub fn validate(&self) -> Result<SubmissionRequest, SubmissionError> {
        let main = self
            .main
            .as_ref()
            .ok_or(SubmissionError::MissingMain)?
            .validate()
            .map_err(SubmissionError::InvalidMain)?;

        let raw_candidates = self.input.as_ref().ok_or(SubmissionError::MissingInput)?;
        let mut candidates = Vec::with_capacity(raw_candidates.len());
        for (index, entry) in raw_candidates.iter().enumerate() {
            let entry = entry
                .as_ref()
                .ok_or(SubmissionError::NullCandidate { index })?;
            let rect = entry
                .validate()
                .map_err(|source| SubmissionError::InvalidCandidate { index, source })?;
            candidates.push(rect);
        }

        Ok(SubmissionRequest { main, candidates })
    }
}

impl SubmissionRequest {
    pub fn new(main: Rect, candidates: Vec<Rect>) -> Self {
        Self { main, candidates }
    }
}
