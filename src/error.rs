//! Gateway error types with HTTP status code mapping.
//!
//! [`BookingError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4002,
///     "message": "selected slot is not available",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`BookingError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status               |
/// |-----------|-------------------|----------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request            |
/// | 2000–2999 | State / Not Found | 404 / 409 / 403            |
/// | 3000–3999 | Server            | 500 Internal Server Error  |
/// | 4000–4999 | Booking-Specific  | 422 Unprocessable Entity   |
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Schedule write rejected: day out of range, slots per hour out of
    /// bounds, or open/close times inconsistent.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Store with the given ID was not found.
    #[error("store not found: {0}")]
    StoreNotFound(uuid::Uuid),

    /// Lost the race to another booking: the storage-level uniqueness
    /// constraint on (store, date, start_time) rejected the write.
    /// Retryable by the caller; the gateway never retries on its own.
    #[error("slot was booked concurrently; please retry")]
    StorageConflict,

    /// Actor is not allowed to perform the operation on this store.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Nothing bookable for the requested store and date (store closed or
    /// fully booked).
    #[error("no available slots for this date")]
    NoAvailability,

    /// The explicitly requested start time is not offered. Covers both
    /// "outside operating hours" and "already booked".
    #[error("selected slot is not available")]
    SlotUnavailable,

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidSchedule(_) => 1002,
            Self::StoreNotFound(_) => 2001,
            Self::StorageConflict => 2002,
            Self::Forbidden(_) => 2003,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::NoAvailability => 4001,
            Self::SlotUnavailable => 4002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidSchedule(_) => StatusCode::BAD_REQUEST,
            Self::StoreNotFound(_) => StatusCode::NOT_FOUND,
            Self::StorageConflict => StatusCode::CONFLICT,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NoAvailability | Self::SlotUnavailable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
