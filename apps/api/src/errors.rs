use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::GatewayError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The normalizer never raises; only input validation and the gateway produce
/// errors, and every kind is translated exactly once at this boundary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream model error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Failed to parse analysis response")]
    MalformedUpstreamResponse,

    #[error("Invalid analysis format")]
    InvalidAnalysisShape,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Upstream { status, message } => AppError::Upstream { status, message },
            GatewayError::Http(e) => {
                tracing::error!("Upstream request failed: {e}");
                AppError::Upstream {
                    status: 500,
                    message: "Error analyzing job with the upstream model".to_string(),
                }
            }
            GatewayError::Malformed(e) => {
                tracing::error!("Upstream response was not valid JSON: {e}");
                AppError::MalformedUpstreamResponse
            }
            GatewayError::EmptyContent => {
                tracing::error!("Upstream model returned empty content");
                AppError::MalformedUpstreamResponse
            }
            GatewayError::InvalidShape(field) => {
                tracing::error!("Upstream analysis payload failed shape check: {field}");
                AppError::InvalidAnalysisShape
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream { status, message } => {
                tracing::error!("Upstream error (status {status}): {message}");
                // Mirror the upstream status where sensible, else 500.
                let code = StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (code, message.clone())
            }
            AppError::MalformedUpstreamResponse => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to parse analysis response".to_string(),
            ),
            AppError::InvalidAnalysisShape => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid analysis format".to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": "error",
            "message": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_is_mirrored() {
        let err = AppError::Upstream {
            status: 429,
            message: "Rate limit exceeded".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_nonsensical_upstream_status_becomes_500() {
        let err = AppError::Upstream {
            status: 200,
            message: "weird".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = AppError::Validation("jobTitle is required".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_gateway_parse_failure_maps_to_malformed() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: AppError = GatewayError::Malformed(parse_err).into();
        assert!(matches!(err, AppError::MalformedUpstreamResponse));
    }
}
