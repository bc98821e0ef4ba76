// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Which coordinate field failed range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateField {
    Latitude,
    Longitude,
}

impl CoordinateField {
    /// Valid degree range for the field.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            CoordinateField::Latitude => (-90.0, 90.0),
            CoordinateField::Longitude => (-180.0, 180.0),
        }
    }
}

impl fmt::Display for CoordinateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateField::Latitude => write!(f, "latitude"),
            CoordinateField::Longitude => write!(f, "longitude"),
        }
    }
}

/// Waypoint and ride validation failures.
///
/// All variants are deterministic functions of bad input, detected before
/// any numeric accumulation begins, and carry enough detail to pinpoint
/// the offending field or value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("At least one waypoint is required to calculate a ride summary")]
    EmptyInput,

    #[error("Invalid {field}: {value}. Must be between {lo} and {hi} degrees.",
            lo = .field.bounds().0, hi = .field.bounds().1)]
    InvalidCoordinate { field: CoordinateField, value: f64 },

    #[error("Invalid timestamp '{raw}': {reason}")]
    InvalidTimestamp { raw: String, reason: String },

    #[error("Waypoints must be in chronological order")]
    NonChronological,

    #[error("number_waypoints ({declared}) must match length of waypoints list ({actual})")]
    CountMismatch { declared: usize, actual: usize },

    #[error("end_time ({end}) must not be before start_time ({start})")]
    EndBeforeStart { start: String, end: String },
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::Validation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_failed",
                Some(err.to_string()),
            ),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
