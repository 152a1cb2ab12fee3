//! MongoDB connection management for the service.
//!
//! - [`mongodb::MongoConfig`] describes the deployment (optionally loaded from the
//!   environment with the `config` feature)
//! - [`mongodb::connect_from_config_with_retry`] establishes a verified [`mongodb::Client`]
//!   with exponential backoff, for services that start before their database
//! - [`mongodb::check_health`] is the readiness probe
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
