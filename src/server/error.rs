use super::types::ErrorResponse;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

/// Why an intake request was not acknowledged.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Request body must be a valid JSON object: {0}")]
    MalformedInput(String),

    #[error("Expected request with `Content-Type: application/json`")]
    UnsupportedMediaType,

    #[error("Request body exceeds the configured size limit")]
    PayloadTooLarge,

    #[error("Internal server error")]
    InternalFault(String),
}

impl IntakeError {
    pub fn internal(detail: impl ToString) -> Self {
        Self::InternalFault(detail.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedInput(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InternalFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for IntakeError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => Self::UnsupportedMediaType,
            JsonRejection::JsonSyntaxError(e) => Self::MalformedInput(e.body_text()),
            JsonRejection::JsonDataError(e) => Self::MalformedInput(e.body_text()),
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => Self::PayloadTooLarge,
            other => Self::MalformedInput(other.body_text()),
        }
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        if let Self::InternalFault(detail) = &self {
            error!("Internal fault while handling request: {}", detail);
        }
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}
