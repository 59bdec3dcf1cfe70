use crate::AppState;
use crate::handlers::{HandlerError, reject};
use crate::llm::detect_model;
use crate::persona::{ChatSession, create_character};
use axum::{Json, extract::State};
use shared::models::{CreateCharacterRequest, SessionSnapshot, UpdateCharacterRequest};

pub async fn list_models(State(state): State<AppState>) -> Result<Json<Vec<String>>, HandlerError> {
    let models = state
        .llm
        .list_models()
        .await
        .map_err(|e| reject("list models", e))?;
    Ok(Json(models))
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.context.lock().await.snapshot())
}

pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<CreateCharacterRequest>,
) -> Result<Json<SessionSnapshot>, HandlerError> {
    let model_given = payload
        .model_identifier
        .as_deref()
        .is_some_and(|m| !m.trim().is_empty());

    let mut character = create_character(payload, &state.settings.model)
        .map_err(|e| reject("create character", e))?;
    if !model_given {
        character.model_identifier = detect_model(state.llm.as_ref(), &state.settings.model).await;
    }

    tracing::info!(
        "Created character {} ({}) on {}",
        character.name,
        character.id,
        character.model_identifier
    );
    let mut ctx = state.context.lock().await;
    ctx.activate(ChatSession::start(character));
    Ok(Json(ctx.snapshot()))
}

pub async fn reset_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let mut ctx = state.context.lock().await;
    ctx.begin_creating();
    Json(ctx.snapshot())
}

pub async fn update_character(
    State(state): State<AppState>,
    Json(payload): Json<UpdateCharacterRequest>,
) -> Result<Json<SessionSnapshot>, HandlerError> {
    let mut ctx = state.context.lock().await;
    let session = ctx
        .session_mut()
        .map_err(|e| reject("update character", e))?;
    if session.update(payload) {
        tracing::info!("Updated character {}", session.id());
    }
    Ok(Json(ctx.snapshot()))
}
