//! HTTP surface of the users domain.
//!
//! Paths are relative to the `/api` prefix the application nests them under.

use axum::Router;
use axum_helpers::{
    StatusResponse,
    errors::handlers::method_not_allowed,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    AddProducts, Address, CreateUser, NewProductItem, Phone, Product, ProductItem,
    ProductQuantity, UpdateProductQuantity, UpdateUser, User, UserProducts,
};
use crate::repository::UserRepository;
use crate::service::UserService;

pub mod user_products;
pub mod users;

pub type SharedService<R> = Arc<UserService<R>>;

/// OpenAPI documentation for the users and users-products endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        users::list_users,
        users::create_user,
        users::get_user,
        users::update_user,
        users::delete_user,
        user_products::list_user_products,
        user_products::add_products,
        user_products::get_user_products,
        user_products::update_product_quantity,
        user_products::remove_products,
    ),
    components(
        schemas(
            User,
            Product,
            Address,
            Phone,
            ProductItem,
            CreateUser,
            UpdateUser,
            NewProductItem,
            AddProducts,
            ProductQuantity,
            UpdateProductQuantity,
            UserProducts,
            StatusResponse
        ),
        responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Users", description = "API for users"),
        (name = "Products", description = "API for products"),
        (name = "Users and Products", description = "API for users and products")
    )
)]
pub struct ApiDoc;

/// Create the router for `/users` and `/users-products`
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service: SharedService<R> = Arc::new(service);

    Router::new()
        .merge(users::routes())
        .merge(user_products::routes())
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(shared_service)
}
