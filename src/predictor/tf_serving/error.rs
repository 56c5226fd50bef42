//! Error types of the model-server prediction backend.

use reqwest::StatusCode;
use thiserror::Error;

use crate::predictor::PredictionError;

/// Convenient result alias returning [`ModelServerError`] failures.
pub type ModelServerResult<T> = Result<T, ModelServerError>;

/// Failures that can occur while talking to the model server.
#[derive(Debug, Error)]
pub enum ModelServerError {
    /// Required environment variable is missing.
    #[error("missing model server environment variable `{var}`")]
    MissingEnvVar { var: &'static str },
    /// Environment variable holds a value that cannot be parsed.
    #[error("invalid value `{value}` for model server environment variable `{var}`")]
    InvalidEnvVar { var: &'static str, value: String },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build model server client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// A request could not be sent or timed out.
    #[error("failed to send model server request to `{url}`")]
    RequestSend {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server returned a non-success status code.
    #[error("unexpected model server response status {status} for `{url}`")]
    RequestStatus { url: String, status: StatusCode },
    /// Response payload could not be parsed into JSON.
    #[error("failed to decode model server response for `{url}`")]
    DecodeResponse {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered without any prediction row.
    #[error("model server returned no prediction for `{url}`")]
    EmptyPrediction { url: String },
}

impl From<ModelServerError> for PredictionError {
    fn from(err: ModelServerError) -> Self {
        match err {
            ModelServerError::EmptyPrediction { .. } => {
                PredictionError::MalformedOutput(err.to_string())
            }
            other => PredictionError::unavailable(other.to_string(), other),
        }
    }
}
