use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::envelope::StatusResponse;

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    let body = StatusResponse::failure("The requested resource was not found");
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// Fallback for a known path called with a method it does not serve.
pub async fn method_not_allowed() -> Response {
    let body = StatusResponse::failure("Method not allowed for this resource");
    (StatusCode::METHOD_NOT_ALLOWED, Json(body)).into_response()
}
