pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use crate::envelope::StatusResponse;
use crate::validation::ValidationReport;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error type rendered as a failure envelope.
///
/// Client errors carry their message to the caller. Server errors are
/// logged in full and answered with a generic message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// Body is not JSON or does not match the expected shape
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationReport),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(_)
            | AppError::Validation(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::JsonExtractorRejection(rejection) => {
                let code = ErrorCode::InvalidJson;
                tracing::info!(error_code = code.code(), "Rejected request body: {}", rejection.body_text());
                StatusResponse::failure(rejection.body_text())
            }
            AppError::Validation(report) => {
                let code = ErrorCode::ValidationError;
                tracing::info!(error_code = code.code(), "Validation failed: {}", report);
                StatusResponse::failure(code.default_message()).with_errors(report.fields)
            }
            AppError::BadRequest(message) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", message);
                StatusResponse::failure(message)
            }
            AppError::NotFound(message) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", message);
                StatusResponse::failure(message)
            }
            AppError::Database(details) => {
                let code = ErrorCode::DatabaseError;
                tracing::error!(error_code = code.code(), "Database error: {}", details);
                StatusResponse::failure(code.default_message())
            }
            AppError::InternalServerError(details) => {
                let code = ErrorCode::InternalError;
                tracing::error!(error_code = code.code(), "Internal server error: {}", details);
                StatusResponse::failure(code.default_message())
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::collections::BTreeMap;

    async fn render(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_keeps_message() {
        let (status, body) = render(AppError::NotFound("User 'ghost' not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "status": false, "message": "User 'ghost' not found" }));
    }

    #[tokio::test]
    async fn test_validation_lists_fields() {
        let report = ValidationReport {
            fields: BTreeMap::from([("email".to_string(), vec!["email".to_string()])]),
        };
        let (status, body) = render(AppError::Validation(report)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], json!(false));
        assert_eq!(body["message"], json!("Request validation failed"));
        assert_eq!(body["errors"]["email"], json!(["email"]));
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let (status, body) =
            render(AppError::Database("connection reset by 10.0.0.3".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], json!("A database error occurred"));
        assert!(!body.to_string().contains("10.0.0.3"));
    }

    #[tokio::test]
    async fn test_bad_request() {
        let (status, body) = render(AppError::BadRequest("Username already exists".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], json!("Username already exists"));
    }
}
