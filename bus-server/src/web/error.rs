//! Application error type and its HTTP mapping.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::domain::InvalidId;
use crate::uwave::UwaveError;

/// Errors a request handler can fail with.
///
/// Lookup misses and empty rosters are not errors; they are answered
/// with descriptive text by the handlers themselves.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed path parameter
    #[error("{0}")]
    BadRequest(String),

    /// Upstream fetch failed
    #[error(transparent)]
    Upstream(#[from] UwaveError),

    /// Request exceeded its deadline
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Template rendering failed
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

impl From<InvalidId> for AppError {
    fn from(e: InvalidId) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(e) if e.is_transport() => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream(UwaveError::MockData { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                error!(%status, %message, "request failed");
            } else {
                warn!(%status, %message, "upstream request failed");
            }
        }

        (status, message).into_response()
    }
}
