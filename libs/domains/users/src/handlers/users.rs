use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use axum_helpers::{
    ApiResponse, StatusResponse, ValidatedJson,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};

use super::SharedService;
use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;

pub fn routes<R: UserRepository + 'static>() -> Router<SharedService<R>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{username}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = ApiResponse<Vec<User>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_users<R: UserRepository>(
    State(service): State<SharedService<R>>,
) -> UserResult<ApiResponse<Vec<User>>> {
    let users = service.list_users().await?;
    Ok(ApiResponse::ok(users))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created", body = StatusResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_user<R: UserRepository>(
    State(service): State<SharedService<R>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<StatusResponse> {
    service.create_user(input).await?;
    Ok(StatusResponse::success())
}

/// Get a user by username
#[utoipa::path(
    get,
    path = "/users/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "User found", body = ApiResponse<User>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_user<R: UserRepository>(
    State(service): State<SharedService<R>>,
    Path(username): Path<String>,
) -> UserResult<ApiResponse<User>> {
    let user = service.get_user(&username).await?;
    Ok(ApiResponse::ok(user))
}

/// Update a user's profile
///
/// `address` and `phone` replace the stored values whole.
#[utoipa::path(
    patch,
    path = "/users/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Username")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<User>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn update_user<R: UserRepository>(
    State(service): State<SharedService<R>>,
    Path(username): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<ApiResponse<User>> {
    let user = service.update_user(&username, input).await?;
    Ok(ApiResponse::ok(user))
}

/// Delete a user
///
/// Succeeds even when no such user exists.
#[utoipa::path(
    delete,
    path = "/users/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "User deleted", body = StatusResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn delete_user<R: UserRepository>(
    State(service): State<SharedService<R>>,
    Path(username): Path<String>,
) -> UserResult<StatusResponse> {
    service.delete_user(&username).await?;
    Ok(StatusResponse::success())
}
