//! # Axum Helpers
//!
//! Shared HTTP plumbing for the service's axum applications.
//!
//! ## Modules
//!
//! - **[`envelope`]**: the `{status, data?, message?, errors?}` JSON wrapper every endpoint returns
//! - **[`errors`]**: [`AppError`] and its mapping onto failure envelopes
//! - **[`validation`]**: [`ValidationReport`], a flat field → reasons view of `validator` errors
//! - **[`extractors`]**: [`ValidatedJson`]
//! - **[`http`]**: CORS and security headers
//! - **[`server`]**: router assembly with OpenAPI UIs, health endpoints, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::{create_production_app, create_router, cors_layer_from_env, health_router};
//! use core_config::{app_info, server::ServerConfig, Environment};
//!
//! let cors = cors_layer_from_env(&Environment::from_env())?;
//! let router = create_router::<ApiDoc>(api_routes, cors)
//!     .await?
//!     .merge(health_router(app_info!()));
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

pub use envelope::{ApiResponse, StatusResponse};
pub use errors::{AppError, ErrorCode};
pub use extractors::ValidatedJson;
pub use http::{cors_layer_from_env, create_cors_layer, create_permissive_cors_layer, security_headers};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};
pub use validation::{ValidationReport, validate};
