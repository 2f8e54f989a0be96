//! Error responses of the control API

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::broker::PublishError;
use crate::publisher::PublisherError;

/// Everything a handler can answer with besides success.
///
/// Conflicts keep the original wire format of the start/stop endpoints and
/// report under the `message` key; validation and broker failures report
/// under the `error` key.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Already publishing")]
    AlreadyPublishing,

    #[error("Not currently publishing")]
    NotPublishing,

    #[error("Temperature value not provided")]
    MissingTemperature,

    #[error("Failed to publish: {0}")]
    Publish(#[from] PublishError),
}

impl From<PublisherError> for ApiError {
    fn from(err: PublisherError) -> Self {
        match err {
            PublisherError::AlreadyRunning => ApiError::AlreadyPublishing,
            PublisherError::NotRunning => ApiError::NotPublishing,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, key) = match &self {
            ApiError::AlreadyPublishing | ApiError::NotPublishing => {
                (StatusCode::BAD_REQUEST, "message")
            }
            ApiError::MissingTemperature => (StatusCode::BAD_REQUEST, "error"),
            ApiError::Publish(_) => (StatusCode::INTERNAL_SERVER_ERROR, "error"),
        };
        (status, Json(json!({ key: self.to_string() }))).into_response()
    }
}
