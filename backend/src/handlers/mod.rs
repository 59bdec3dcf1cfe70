pub mod avatars;
pub mod characters;
pub mod chats;
pub mod messages;

pub use avatars::*;
pub use characters::*;
pub use chats::*;
pub use messages::*;

use crate::error::ChatError;
use axum::http::StatusCode;

pub type HandlerError = (StatusCode, String);

/// Log a failed operation and turn it into a response the UI can show.
pub(crate) fn reject(action: &str, e: ChatError) -> HandlerError {
    let status = match &e {
        ChatError::Validation(_) => StatusCode::BAD_REQUEST,
        ChatError::NotFound(_) | ChatError::NoActiveSession => StatusCode::NOT_FOUND,
        ChatError::MalformedRecord { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ChatError::Generation(_) => StatusCode::BAD_GATEWAY,
        ChatError::Storage(_) | ChatError::Serde(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("Failed to {}: {:?}", action, e);
    } else {
        tracing::warn!("Failed to {}: {}", action, e);
    }
    (status, e.to_string())
}
