//! Router for the health API

use std::sync::Arc;

use axum::{Json, Router};

use super::public::HealthResponse;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Create the health router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(health))
}
