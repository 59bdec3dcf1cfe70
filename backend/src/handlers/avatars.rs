use crate::AppState;
use crate::error::ChatError;
use crate::handlers::{HandlerError, reject};
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct AvatarUploadResponse {
    pub avatar_reference: String,
}

pub async fn upload_avatar(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AvatarUploadResponse>, HandlerError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to get next field: {:?}", e);
        (StatusCode::BAD_REQUEST, e.to_string())
    })? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();

        if name == "avatar" && !file_name.is_empty() {
            let data = field
                .bytes()
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

            let avatar_reference = state
                .avatars
                .save(&file_name, &data)
                .await
                .map_err(|e| reject("store avatar", e))?;
            return Ok(Json(AvatarUploadResponse { avatar_reference }));
        }
    }

    Err(reject(
        "store avatar",
        ChatError::Validation("missing `avatar` file field".to_string()),
    ))
}
