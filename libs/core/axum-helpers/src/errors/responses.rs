//! Reusable OpenAPI responses for the failure envelope.

use crate::envelope::StatusResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Malformed body, failed validation or a rejected business rule",
    content_type = "application/json",
    example = json!({
        "status": false,
        "message": "Request validation failed",
        "errors": { "email": ["email"] }
    })
)]
pub struct BadRequestResponse(pub StatusResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "status": false,
        "message": "User 'jdoe' not found"
    })
)]
pub struct NotFoundResponse(pub StatusResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "status": false,
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub StatusResponse);
