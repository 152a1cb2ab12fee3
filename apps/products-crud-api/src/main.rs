use axum_helpers::{cors_layer_from_env, create_production_app, health_router};
use core_config::load_dotenv;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::MongoUserRepository;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let dotenv = load_dotenv();
    let config = Config::from_env()?;
    init_tracing(&config.environment);
    match dotenv {
        Ok(true) => info!("Loaded configuration from .env"),
        Ok(false) => {}
        Err(e) => warn!(error = %e, "Ignoring unusable .env file"),
    }

    info!(database = %config.mongodb.database(), "Connecting to MongoDB");
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());

    MongoUserRepository::new(&db).init_indexes().await?;
    info!("Connected to MongoDB database: {}", config.mongodb.database());

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let cors = cors_layer_from_env(&state.config.environment)?;
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(&state), cors).await?;
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting {} v{} (shutdown timeout {:?})",
        state.config.app.name, state.config.app.version, SHUTDOWN_TIMEOUT
    );

    let server = state.config.server.clone();
    create_production_app(app, &server, SHUTDOWN_TIMEOUT, async move {
        info!("Closing MongoDB connections");
        state.mongo_client.shutdown().await;
        info!("MongoDB connections closed");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shutdown complete");
    Ok(())
}
