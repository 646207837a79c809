//! HTTP handlers and wire envelopes.
//!
//! # Responsibility
//! - Decode submission bodies and map validation failures to `400`.
//! - Delegate evaluation and persistence to [`SubmissionService`].
//! - Render stored records in their public JSON shape.
//!
//! # Invariants
//! - A well-formed submission always answers `200` with
//!   [`ACCEPTED_MESSAGE`], whatever happened to individual inserts.
//! - Handlers never panic on caller input.

use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use log::{error, warn};
use rectlog_core::{StoredRecord, SubmissionError, SubmissionInput, SubmissionRequest};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Acknowledgement returned for every well-formed submission.
pub const ACCEPTED_MESSAGE: &str = "Your input Was Parsed Successfully.";

/// Success envelope for `POST /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Failure envelope shared by all routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Public projection of one stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordView {
    pub time: DateTime<Utc>,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl From<&StoredRecord> for RecordView {
    fn from(record: &StoredRecord) -> Self {
        Self {
            time: record.time,
            x: record.x,
            y: record.y,
            width: record.width,
            height: record.height,
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

/// Reasons a submission body is rejected before evaluation.
#[derive(Debug)]
pub enum BodyError {
    Json(serde_json::Error),
    Invalid(SubmissionError),
}

impl Display for BodyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "{err}"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BodyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

/// Decodes and validates a raw `POST /` body.
///
/// The body is parsed as JSON whatever its `Content-Type`.
pub fn decode_submission(body: &[u8]) -> Result<SubmissionRequest, BodyError> {
    let input: SubmissionInput = serde_json::from_slice(body).map_err(BodyError::Json)?;
    input.validate().map_err(BodyError::Invalid)
}

/// `POST /`: evaluates candidates against `main` and stores the matches.
pub async fn submit_rects(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    let request = match decode_submission(&body) {
        Ok(request) => request,
        Err(err) => {
            warn!(
                "event=submission_rejected module=api status=error error_code=bad_request error={}",
                err
            );
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: err.to_string(),
                }),
            ));
        }
    };

    state.service.submit(&request);

    Ok((
        StatusCode::OK,
        Json(MessageBody {
            message: ACCEPTED_MESSAGE.to_string(),
        }),
    ))
}

/// `GET /`: returns every stored record.
pub async fn list_records(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<RecordView>>), ApiError> {
    match state.service.list_records() {
        Ok(records) => Ok((
            StatusCode::OK,
            Json(records.iter().map(RecordView::from).collect()),
        )),
        Err(err) => {
            error!(
                "event=records_list module=api status=error error_code=store_read_failed error={}",
                err
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: err.to_string(),
                }),
            ))
        }
    }
}
