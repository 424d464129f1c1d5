//! HTTP error types for the Zero Shift site server.
//!
//! Every error variant produces the JSON shape the site's client code
//! expects: `{ success: false, error: ... }`, with field-level `details` on
//! validation failures. Internal detail is logged, never returned.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use zeroshift_content::error::ContentError;

use crate::forms::FieldViolation;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// The submission failed schema validation — the only error that carries
    /// structured detail back to the caller.
    Validation(Vec<FieldViolation>),
    /// The client sent something unparseable.
    BadRequest(String),
    /// The CMS failed and no fallback covers the request.
    Upstream(String),
    /// Anything unexpected. The message is logged; the caller gets a generic
    /// body with no internal detail.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<FieldViolation>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_msg, details) = match self {
            Self::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                "Invalid form data".to_owned(),
                Some(violations),
            ),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            Self::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg, None),
            Self::Internal(msg) => {
                error!(detail = %msg, "internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred processing your request".to_owned(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            success: false,
            error: error_msg,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        Self::Upstream(err.to_string())
    }
}
