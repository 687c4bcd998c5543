use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use log::error;
use serde::Serialize;

use crate::service::error::ServiceError;

/// Request-boundary error. Always rendered as `{ "error": <message> }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Server(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// Maps conflicts and unknown tokens to 400 instead of 409/500, as the
    /// confirmation endpoint reports every rejected token the same way.
    pub fn from_confirmation(err: ServiceError) -> Self {
        match err {
            ServiceError::Conflict { message } | ServiceError::NotFound { message } => {
                ApiError::BadRequest(message)
            }
            other => other.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation { message, .. } => ApiError::BadRequest(message),
            ServiceError::Conflict { message } => ApiError::Conflict(message),
            ServiceError::NotFound { message } => ApiError::BadRequest(message),
            ServiceError::Notification(e) => {
                error!("Notification failed: {e}");
                ApiError::Server("Failed to send confirmation email".to_string())
            }
            other => {
                error!("Request failed: {other}");
                ApiError::Server("Internal server error".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
