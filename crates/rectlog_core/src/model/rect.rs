//! Axis-aligned rectangle model.
//!
//! # Responsibility
//! - Define the canonical integer rectangle used by overlap evaluation.
//! - Convert nullable wire input into a fully-populated rectangle.
//!
//! # Invariants
//! - `x,y` is the lower corner; `width,height` are extents.
//! - Extents are not sign-checked. Negative values pass through to the
//!   evaluator arithmetic unchanged.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Axis-aligned rectangle with integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Rectangle field names, used to report which mandatory field was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectField {
    X,
    Y,
    Width,
    Height,
}

impl RectField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

/// Validation failure for a rectangle received from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RectValidationError {
    MissingField(RectField),
}

impl Display for RectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => {
                write!(f, "field `{}` is required", field.as_str())
            }
        }
    }
}

impl Error for RectValidationError {}

/// Wire form of a rectangle.
///
/// Every field is optional so that an absent or `null` value can be told
/// apart from an explicit `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RectInput {
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl RectInput {
    /// Converts into a [`Rect`], rejecting the first absent field in
    /// `x, y, width, height` order.
    pub fn validate(&self) -> Result<Rect, RectValidationError> {
        let require = |value: Option<i64>, field: RectField| {
            value.ok_or(RectValidationError::MissingField(field))
        };

        Ok(Rect {
            x: require(self.x, RectField::X)?,
            y: require(self.y, RectField::Y)?,
            width: require(self.width, RectField::Width)?,
            height: require(self.height, RectField::Height)?,
        })
    }
}

impl From<Rect> for RectInput {
    fn from(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
        }
    }
}
