use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ValidationReport};
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code for a unique index violation
const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User '{0}' not found")]
    NotFound(String),

    #[error("Product '{product}' not found for user '{username}'")]
    ProductNotFound { username: String, product: String },

    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    #[error("Username '{body}' does not match '{path}'; usernames cannot be changed")]
    UsernameMismatch { path: String, body: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationReport),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for UserError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

/// True when a write was rejected by a unique index.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(report) => AppError::Validation(report),
            UserError::DuplicateUsername(_) | UserError::UsernameMismatch { .. } => {
                AppError::BadRequest(err.to_string())
            }
            UserError::NotFound(_) | UserError::ProductNotFound { .. } => {
                AppError::NotFound(err.to_string())
            }
            UserError::PasswordHash(details) => AppError::InternalServerError(details),
            UserError::Database(details) => AppError::Database(details),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: UserError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(UserError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(UserError::ProductNotFound { username: "x".into(), product: "p".into() }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(UserError::DuplicateUsername("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(UserError::UsernameMismatch { path: "a".into(), body: "b".into() }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(UserError::Validation(ValidationReport::default())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(UserError::Database("down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(UserError::PasswordHash("oops".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_name_the_user() {
        assert_eq!(UserError::NotFound("jdoe".into()).to_string(), "User 'jdoe' not found");
        assert_eq!(
            UserError::DuplicateUsername("jdoe".into()).to_string(),
            "Username 'jdoe' already exists"
        );
    }

    #[test]
    fn test_non_write_errors_are_database_errors() {
        let err = mongodb::error::Error::from(std::io::Error::other("boom"));
        assert!(!is_duplicate_key(&err));
        assert!(matches!(UserError::from(err), UserError::Database(_)));
    }
}
