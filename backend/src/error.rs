//! Error handling for the Crop Advisor backend
//!
//! Every failure leaves the server as `{"error": "...", "code": "..."}`.
//! Model-side failures share one generic message; details stay in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorBody;
use thiserror::Error;

/// Message returned for any failure of the reasoning stage
pub const AI_FAILURE_MESSAGE: &str = "AI reasoning failed";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // External service errors
    #[error("Weather API error: {0}")]
    WeatherApi(String),

    #[error("Generative model error: {0}")]
    AiService(String),

    #[error("Invalid AI response: {0}")]
    AiResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::InvalidBody(msg) => (StatusCode::BAD_REQUEST, "INVALID_BODY", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::WeatherApi(_) => (
                StatusCode::BAD_GATEWAY,
                "WEATHER_API_ERROR",
                "Weather service is temporarily unavailable".to_string(),
            ),
            AppError::AiService(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI_SERVICE_ERROR",
                AI_FAILURE_MESSAGE.to_string(),
            ),
            AppError::AiResponse(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI_RESPONSE_INVALID",
                AI_FAILURE_MESSAGE.to_string(),
            ),
            AppError::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
                "Server is not configured correctly".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.status_and_body();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        let body = ErrorBody {
            error: message,
            code: Some(code.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_errors_are_generic_500() {
        for err in [
            AppError::AiService("quota exceeded".into()),
            AppError::AiResponse("expected value at line 1".into()),
        ] {
            let (status, _, message) = err.status_and_body();
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, AI_FAILURE_MESSAGE);
        }
    }

    #[test]
    fn test_validation_is_400_with_detail() {
        let (status, code, message) = AppError::Validation("soil is required".into()).status_and_body();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
        assert_eq!(message, "soil is required");
    }
}
