// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Every variant maps to a `{"success": false, ...}` body so the frontend can
//! render the message without caring which layer failed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Location data not available for {0}")]
    LocationDataUnavailable(String),

    #[error("Missing required data: {}", .0.join(", "))]
    MissingRequiredField(Vec<&'static str>),

    #[error("Not currently checked in")]
    NotCheckedIn,

    #[error("Slack webhook URL not configured. Please set SLACK_WEBHOOK_URL environment variable.")]
    NotificationUnavailable,

    #[error("Notification delivery failed: {0}")]
    NotificationDeliveryFailed(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code for the error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::LocationNotFound(_) => "location_not_found",
            AppError::LocationDataUnavailable(_) => "location_data_unavailable",
            AppError::MissingRequiredField(_) => "missing_required_field",
            AppError::NotCheckedIn => "not_checked_in",
            AppError::NotificationUnavailable => "notification_unavailable",
            AppError::NotificationDeliveryFailed(_) => "notification_delivery_failed",
            AppError::BadRequest(_) => "bad_request",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::LocationNotFound(_) => StatusCode::NOT_FOUND,
            AppError::LocationDataUnavailable(_)
            | AppError::MissingRequiredField(_)
            | AppError::NotCheckedIn
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotificationUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotificationDeliveryFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                "Internal server error".to_string()
            }
            AppError::NotificationDeliveryFailed(detail) => {
                tracing::warn!(detail = %detail, "Notification delivery failed");
                self.to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            success: false,
            error: self.code().to_string(),
            message,
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_names() {
        let err = AppError::MissingRequiredField(vec!["location_id", "latitude"]);
        assert_eq!(
            err.to_string(),
            "Missing required data: location_id, latitude"
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::LocationNotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::NotCheckedIn.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::NotificationUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::NotificationDeliveryFailed("timeout".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
