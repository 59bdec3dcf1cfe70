pub mod avatars;
pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod llm;
pub mod persona;
pub mod prompt;
mod state;
pub mod store;

pub use crate::state::AppState;

use crate::config::BackendConfig;
use crate::handlers::{
    clear_history, create_session, delete_record, get_session, list_models, list_records,
    load_record, reset_session, save_session, send_message, update_character, upload_avatar,
};
use crate::llm::OpenAiCompatibleModel;
use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Mount the API on `router` using the OpenAI-compatible model client.
pub fn init(router: Router<AppState>, config: BackendConfig) -> Router<()> {
    tracing::info!(
        "Storing chats in {} and avatars in {}",
        config.chats_dir().display(),
        config.avatars_dir().display()
    );
    let llm = Arc::new(OpenAiCompatibleModel::new(&config.settings));
    let state = AppState::new(config, llm);
    routes(router).with_state(state)
}

pub fn routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/models", get(list_models))
        .route(
            "/api/session",
            get(get_session).post(create_session).delete(reset_session),
        )
        .route("/api/session/character", patch(update_character))
        .route("/api/session/messages", post(send_message))
        .route("/api/session/clear", post(clear_history))
        .route("/api/session/save", post(save_session))
        .route("/api/records", get(list_records))
        .route("/api/records/{record_id}/load", post(load_record))
        .route("/api/records/{record_id}", delete(delete_record))
        .route("/api/avatars", post(upload_avatar))
        .layer(CorsLayer::permissive())
}
