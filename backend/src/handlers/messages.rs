use crate::AppState;
use crate::generator::generate_response;
use crate::handlers::{HandlerError, reject};
use axum::{Json, extract::State};
use shared::models::{SendMessageRequest, SendMessageResponse, SessionSnapshot};

pub async fn send_message(
    State(state): State<AppState>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, HandlerError> {
    let mut ctx = state.context.lock().await;
    let session = ctx.session_mut().map_err(|e| reject("send message", e))?;

    let reply = generate_response(session, state.llm.as_ref(), &payload.content)
        .await
        .map_err(|e| reject("generate response", e))?;

    Ok(Json(SendMessageResponse {
        reply: reply.text,
        recorded: reply.recorded,
    }))
}

pub async fn clear_history(
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, HandlerError> {
    let mut ctx = state.context.lock().await;
    ctx.session_mut()
        .map_err(|e| reject("clear history", e))?
        .clear_history();
    Ok(Json(ctx.snapshot()))
}
