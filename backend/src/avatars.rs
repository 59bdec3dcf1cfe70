use crate::error::{ChatError, ChatResult};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Stores avatar images next to, but separate from, the chat records.
#[derive(Clone, Debug)]
pub struct AvatarStore {
    dir: PathBuf,
}

impl AvatarStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `data` under a fresh name and return the path to reference it by.
    pub async fn save(&self, file_name: &str, data: &[u8]) -> ChatResult<String> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .filter(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| {
                ChatError::Validation(format!("unsupported avatar file: {file_name}"))
            })?;
        if data.is_empty() {
            return Err(ChatError::Validation("avatar file is empty".to_string()));
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(format!("{}.{}", Uuid::new_v4(), ext));
        tokio::fs::write(&path, data).await?;

        tracing::info!("Stored avatar {} ({} bytes)", path.display(), data.len());
        Ok(path.to_string_lossy().into_owned())
    }
}
