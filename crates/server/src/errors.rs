use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use repostly::AnalysisResult;
use tracing::{error, warn};

/// Shown to the caller for any unexpected fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please try again later.";

/// A custom error type for the server application.
///
/// Every variant renders as the `{ success: false, error }` envelope.
#[derive(Debug)]
pub enum AppError {
    /// The request itself is unusable. The message is shown to the caller.
    Validation(String),
    /// A fetch or OCR call failed. The message is a generic user-facing one.
    Upstream(String),
    /// Anything unexpected. Logged in full, hidden from the caller.
    Internal(anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Upstream(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status();
        let error_message = match self {
            AppError::Validation(msg) => {
                warn!("Rejected request: {msg}");
                msg
            }
            AppError::Upstream(msg) => msg,
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status_code, Json(AnalysisResult::failure(error_message))).into_response()
    }
}
