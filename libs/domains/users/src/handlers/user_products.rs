use axum::{
    Router,
    extract::{Path, State},
    routing::{delete, get},
};
use axum_helpers::{
    ApiResponse, StatusResponse, ValidatedJson,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};

use super::SharedService;
use crate::error::UserResult;
use crate::models::{AddProducts, ProductItem, UpdateProductQuantity, UserProducts};
use crate::repository::UserRepository;

pub fn routes<R: UserRepository + 'static>() -> Router<SharedService<R>> {
    Router::new()
        .route(
            "/users-products",
            get(list_user_products).post(add_products),
        )
        .route(
            "/users-products/{username}",
            get(get_user_products).patch(update_product_quantity),
        )
        .route(
            "/users-products/{username}/products/{product}",
            delete(remove_products),
        )
}

/// Products of every user
#[utoipa::path(
    get,
    path = "/users-products",
    tag = "Users and Products",
    responses(
        (status = 200, description = "Username and products of each user", body = ApiResponse<Vec<UserProducts>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_user_products<R: UserRepository>(
    State(service): State<SharedService<R>>,
) -> UserResult<ApiResponse<Vec<UserProducts>>> {
    let users = service.list_user_products().await?;
    Ok(ApiResponse::ok(users))
}

/// Add product lines to a user
#[utoipa::path(
    post,
    path = "/users-products",
    tag = "Users and Products",
    request_body = AddProducts,
    responses(
        (status = 200, description = "Products added", body = StatusResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn add_products<R: UserRepository>(
    State(service): State<SharedService<R>>,
    ValidatedJson(input): ValidatedJson<AddProducts>,
) -> UserResult<StatusResponse> {
    service.add_products(input).await?;
    Ok(StatusResponse::success())
}

/// Products of one user
#[utoipa::path(
    get,
    path = "/users-products/{username}",
    tag = "Users and Products",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "The user's product lines", body = ApiResponse<Vec<ProductItem>>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_user_products<R: UserRepository>(
    State(service): State<SharedService<R>>,
    Path(username): Path<String>,
) -> UserResult<ApiResponse<Vec<ProductItem>>> {
    let products = service.get_user_products(&username).await?;
    Ok(ApiResponse::ok(products))
}

/// Change the quantity of one product line
#[utoipa::path(
    patch,
    path = "/users-products/{username}",
    tag = "Users and Products",
    params(
        ("username" = String, Path, description = "Username")
    ),
    request_body = UpdateProductQuantity,
    responses(
        (status = 200, description = "Quantity updated", body = StatusResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn update_product_quantity<R: UserRepository>(
    State(service): State<SharedService<R>>,
    Path(username): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateProductQuantity>,
) -> UserResult<StatusResponse> {
    service.update_product_quantity(&username, input).await?;
    Ok(StatusResponse::success())
}

/// Remove product lines by id or by product name
#[utoipa::path(
    delete,
    path = "/users-products/{username}/products/{product}",
    tag = "Users and Products",
    params(
        ("username" = String, Path, description = "Username"),
        ("product" = String, Path, description = "Line `_id` or product name")
    ),
    responses(
        (status = 200, description = "Matching lines removed", body = StatusResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn remove_products<R: UserRepository>(
    State(service): State<SharedService<R>>,
    Path((username, product)): Path<(String, String)>,
) -> UserResult<StatusResponse> {
    service.remove_products(&username, &product).await?;
    Ok(StatusResponse::success())
}
