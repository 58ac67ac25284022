use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant is terminal for the current request; nothing is retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("No response from the text generation service")]
    EmptyResponse,

    #[error("Malformed response from the text generation service: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    UpstreamFailure(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable(_)
            | AppError::EmptyResponse
            | AppError::MalformedResponse(_)
            | AppError::UpstreamFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::InvalidRequest(msg) => tracing::debug!("Rejected request: {msg}"),
            AppError::ServiceUnavailable(msg) => tracing::error!("Service unavailable: {msg}"),
            AppError::EmptyResponse => tracing::error!("LLM returned no content"),
            AppError::MalformedResponse(msg) => tracing::error!("Malformed LLM output: {msg}"),
            AppError::UpstreamFailure(msg) => tracing::error!("LLM call failed: {msg}"),
        }

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::InvalidRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ServiceUnavailable("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::EmptyResponse.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::MalformedResponse("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::UpstreamFailure("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_pass_through() {
        assert_eq!(
            AppError::UpstreamFailure("rate limit reached".into()).to_string(),
            "rate limit reached"
        );
        assert_eq!(
            AppError::InvalidRequest("Missing required fields: task, mode, or text".into())
                .to_string(),
            "Missing required fields: task, mode, or text"
        );
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::EmptyResponse.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({ "error": "No response from the text generation service" })
        );
    }
}
