//! Readiness endpoint

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::Value;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// 200 while MongoDB answers a ping, 503 otherwise
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let mongodb: HealthCheckFuture = Box::pin(async {
        database::mongodb::check_health(&state.mongo_client)
            .await
            .map_err(|e| e.to_string())
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}
