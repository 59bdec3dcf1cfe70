use crate::AppState;
use crate::error::ChatError;
use crate::handlers::{HandlerError, reject};
use crate::persona::ChatSession;
use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{SaveSessionResponse, SessionSnapshot, SessionSummary};
use uuid::Uuid;

pub async fn save_session(
    State(state): State<AppState>,
) -> Result<Json<SaveSessionResponse>, HandlerError> {
    let mut ctx = state.context.lock().await;
    let session = ctx
        .session()
        .ok_or_else(|| reject("save session", ChatError::NoActiveSession))?;
    let id = session.id();
    let mut record = session.to_record();

    let path = state
        .store
        .save(&mut record)
        .await
        .map_err(|e| reject("save session", e))?;
    ctx.mark_saved().map_err(|e| reject("save session", e))?;
    Ok(Json(SaveSessionResponse {
        id,
        path: path.to_string_lossy().into_owned(),
    }))
}

pub async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionSummary>>, HandlerError> {
    let summaries = state
        .store
        .list()
        .await
        .map_err(|e| reject("list records", e))?;
    Ok(Json(summaries))
}

pub async fn load_record(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, HandlerError> {
    // Fully validated before the live session is touched
    let record = state
        .store
        .load_by_id(record_id)
        .await
        .map_err(|e| reject("load record", e))?;

    let mut ctx = state.context.lock().await;
    ctx.activate(ChatSession::restore(record, &state.settings.model));
    Ok(Json(ctx.snapshot()))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
) -> Result<Json<()>, HandlerError> {
    state
        .store
        .delete(record_id)
        .await
        .map_err(|e| reject("delete record", e))?;
    Ok(Json(()))
}
