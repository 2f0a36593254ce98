//! Readiness endpoint

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::mongodb::check_health;

use crate::state::AppState;

/// `200` once MongoDB answers a ping, `503` otherwise
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> =
        vec![("database", Box::pin(check_health(&state.mongo_client)))];

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
