//! The single error boundary for every route.
//!
//! Handlers return `Result<_, ApiError>`; [`ApiError`]'s [`IntoResponse`] impl
//! is the only place a failure becomes a status code and a JSON body. All
//! failures share the `{"error": "<message>"}` envelope.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};
use tutor::TutorError;

use crate::dto::ErrorResponse;

/// Any failure a route can produce.
///
/// Maps to 400 for client mistakes and 500 for upstream failures; see
/// [`ApiError::status`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The body was not JSON, or did not fit the expected shape.
    #[error("{0}")]
    MalformedBody(String),

    /// A domain failure: a missing field or a failed upstream call.
    #[error(transparent)]
    Tutor(#[from] TutorError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl ApiError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody(_) | Self::Tutor(TutorError::Validation { .. }) => {
                StatusCode::BAD_REQUEST
            }
            Self::Tutor(TutorError::Upstream(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "Request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
