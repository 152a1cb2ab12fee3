//! Shared application state.

use mongodb::{Client, Database};

/// Cloned into the routers that need it; the MongoDB handles share one pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}
