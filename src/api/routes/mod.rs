//! API routes module

pub mod chat;
pub mod health;

use std::sync::Arc;

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<AppState>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Assistant chat route
        .nest("/chat", chat::router())
        // Liveness probe
        .nest("/health", health::router())
}
