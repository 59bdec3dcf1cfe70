use std::path::PathBuf;
use thiserror::Error;

pub type ChatResult<T> = Result<T, ChatError>;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Malformed record {}: {reason}", .path.display())]
    MalformedRecord { path: PathBuf, reason: String },
    #[error("Generation error: {0}")]
    Generation(String),
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("No active session")]
    NoActiveSession,
}

impl From<async_openai::error::OpenAIError> for ChatError {
    fn from(e: async_openai::error::OpenAIError) -> Self {
        ChatError::Generation(e.to_string())
    }
}
