use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::{color::ColorFormatError, predictor::PredictionError};

/// Stable tag identifying the kind of failure in error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Required request field is absent.
    MissingField,
    /// Request field is present but not a string.
    InvalidField,
    /// Hex or decimal color value cannot be decoded.
    InvalidColorFormat,
    /// Request body cannot be decoded at all.
    MalformedPayload,
    /// The name-prediction model failed.
    PredictionFailure,
    /// No name-prediction model is installed.
    PredictorUnavailable,
    /// Unexpected internal fault.
    Internal,
}

/// Errors that can occur while resolving a palette request.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Required key is absent from the request payload.
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// Key is present but does not hold a string.
    #[error("field `{0}` must be a string")]
    InvalidField(&'static str),
    /// Color value is neither valid hex nor a valid decimal list.
    #[error("invalid color format: {0}")]
    InvalidColorFormat(#[from] ColorFormatError),
    /// The name-prediction collaborator failed or returned malformed output.
    #[error("prediction failed")]
    PredictionFailure(#[source] PredictionError),
    /// Running in degraded mode without a name-prediction collaborator.
    #[error("name prediction unavailable (degraded mode)")]
    PredictorUnavailable,
}

impl From<PredictionError> for ServiceError {
    fn from(err: PredictionError) -> Self {
        ServiceError::PredictionFailure(err)
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {1}")]
    BadRequest(ErrorCode, String),
    /// Upstream model failed while serving the request.
    #[error("bad gateway: {1}")]
    BadGateway(ErrorCode, String),
    /// Service unavailable or degraded.
    #[error("service unavailable: {1}")]
    ServiceUnavailable(ErrorCode, String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Tag reported alongside the message.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::BadRequest(code, _)
            | AppError::BadGateway(code, _)
            | AppError::ServiceUnavailable(code, _) => *code,
            AppError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Reject a request body that cannot be decoded.
    pub fn malformed_payload(message: impl Into<String>) -> Self {
        AppError::BadRequest(ErrorCode::MalformedPayload, message.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        let message = match &err {
            ServiceError::PredictionFailure(source) => format!("{err}: {source}"),
            _ => err.to_string(),
        };
        match err {
            ServiceError::MissingField(_) => AppError::BadRequest(ErrorCode::MissingField, message),
            ServiceError::InvalidField(_) => AppError::BadRequest(ErrorCode::InvalidField, message),
            ServiceError::InvalidColorFormat(_) => {
                AppError::BadRequest(ErrorCode::InvalidColorFormat, message)
            }
            ServiceError::PredictionFailure(_) => {
                AppError::BadGateway(ErrorCode::PredictionFailure, message)
            }
            ServiceError::PredictorUnavailable => {
                AppError::ServiceUnavailable(ErrorCode::PredictorUnavailable, message)
            }
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Failure kind.
    pub error: ErrorCode,
    /// Human-readable description.
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(..) => StatusCode::BAD_REQUEST,
            AppError::BadGateway(..) => StatusCode::BAD_GATEWAY,
            AppError::ServiceUnavailable(..) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            error: self.code(),
            message: match self {
                AppError::BadRequest(_, message)
                | AppError::BadGateway(_, message)
                | AppError::ServiceUnavailable(_, message)
                | AppError::Internal(message) => message,
            },
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_keep_their_tag() {
        let cases = [
            (ServiceError::MissingField("name"), ErrorCode::MissingField),
            (ServiceError::InvalidField("name"), ErrorCode::InvalidField),
            (
                ServiceError::InvalidColorFormat(ColorFormatError::HexLength {
                    value: "#fff".into(),
                }),
                ErrorCode::InvalidColorFormat,
            ),
            (
                ServiceError::PredictionFailure(PredictionError::MalformedOutput("x".into())),
                ErrorCode::PredictionFailure,
            ),
            (
                ServiceError::PredictorUnavailable,
                ErrorCode::PredictorUnavailable,
            ),
        ];

        for (err, code) in cases {
            assert_eq!(AppError::from(err).code(), code);
        }
    }

    #[test]
    fn status_codes_follow_error_class() {
        let response = AppError::from(ServiceError::MissingField("color_value")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::from(ServiceError::PredictorUnavailable).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = AppError::from(ServiceError::PredictionFailure(
            PredictionError::MalformedOutput("2 channels".into()),
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn prediction_message_includes_cause() {
        let err = AppError::from(ServiceError::PredictionFailure(
            PredictionError::MalformedOutput("expected 3 channels, got 2".into()),
        ));
        assert_eq!(
            err.to_string(),
            "bad gateway: prediction failed: malformed prediction output: expected 3 channels, got 2"
        );
    }
}
