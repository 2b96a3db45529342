//! Router for the chat API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::Instrument;
use uuid::Uuid;

use super::public;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

/// Classify one message and answer it. Catalog failures turn into a
/// 500 with a readable message so the widget can show its apology.
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ChatRequest>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id);

    let answer = state
        .responder
        .respond(payload.utterance())
        .instrument(span)
        .await;

    let status = if answer.is_fault() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    tracing::debug!(
        %request_id,
        "Answered with {} ({})",
        status,
        if answer.reply().is_product_list() { "products" } else { "text" }
    );

    (
        status,
        Json(public::ChatResponse::new(answer.into_reply())),
    )
        .into_response()
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(chat_handler))
}
