//! File-backed session store.
//!
//! Directory structure:
//! ```text
//! chats/
//! ├── <uuid-1>.json
//! └── <uuid-2>.json
//! ```
//! One record per file, named by its `unique_id`. Saves overwrite.

use crate::error::{ChatError, ChatResult};
use serde::Deserialize;
use serde::de::IgnoredAny;
use shared::models::{SessionRecord, SessionSummary};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const RECORD_EXT: &str = "json";
const REQUIRED_KEYS: [&str; 4] = ["name", "persona_description", "greeting", "messages"];
const SNIPPET_CHARS: usize = 80;

/// Just enough of a record to describe it in a listing.
#[derive(Deserialize)]
struct RecordHeader {
    #[serde(default)]
    unique_id: Option<Uuid>,
    name: String,
    persona_description: String,
    messages: Vec<IgnoredAny>,
}

#[derive(Clone, Debug)]
pub struct SessionStore {
    dir: PathBuf,
}

fn id_from_path(path: &Path) -> Option<Uuid> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| Uuid::parse_str(stem).ok())
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.{RECORD_EXT}"))
    }

    /// Persist `record`, assigning it an id first if it has none. An existing
    /// file for the same id is replaced.
    pub async fn save(&self, record: &mut SessionRecord) -> ChatResult<PathBuf> {
        let id = *record.unique_id.get_or_insert_with(Uuid::new_v4);
        let content = serde_json::to_string_pretty(&*record)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(id);
        let tmp = path.with_extension(format!("{RECORD_EXT}.tmp"));
        tokio::fs::write(&tmp, content).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                tracing::warn!("Failed to remove {}: {}", tmp.display(), cleanup);
            }
            return Err(e.into());
        }

        tracing::info!(
            "Saved session {} ({} messages) to {}",
            id,
            record.messages.len(),
            path.display()
        );
        Ok(path)
    }

    /// Read and validate a record. Nothing is returned unless every required
    /// key is present and the whole record decodes.
    pub async fn load(&self, path: &Path) -> ChatResult<SessionRecord> {
        let content = tokio::fs::read_to_string(path).await?;
        let malformed = |reason: String| ChatError::MalformedRecord {
            path: path.to_path_buf(),
            reason,
        };

        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| malformed(e.to_string()))?;
        let object = value
            .as_object()
            .ok_or_else(|| malformed("expected a JSON object".to_string()))?;
        let missing: Vec<&str> = REQUIRED_KEYS
            .into_iter()
            .filter(|key| !object.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(malformed(format!(
                "missing required keys: {}",
                missing.join(", ")
            )));
        }

        let mut record: SessionRecord =
            serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
        // The file name is the storage key; it wins over the embedded id
        if let Some(file_id) = id_from_path(path) {
            if record.unique_id.is_some_and(|id| id != file_id) {
                tracing::warn!(
                    "Record {} carries id {:?}; using the file id",
                    path.display(),
                    record.unique_id
                );
            }
            record.unique_id = Some(file_id);
        }

        tracing::info!(
            "Loaded session {:?} ({} messages) from {}",
            record.unique_id,
            record.messages.len(),
            path.display()
        );
        Ok(record)
    }

    pub async fn load_by_id(&self, id: Uuid) -> ChatResult<SessionRecord> {
        let path = self.path_for(id);
        match self.load(&path).await {
            Err(ChatError::Storage(e)) if e.kind() == ErrorKind::NotFound => {
                Err(ChatError::NotFound(format!("session {id}")))
            }
            other => other,
        }
    }

    /// Summaries of every readable record, ordered by name. Unreadable files
    /// are skipped.
    pub async fn list(&self) -> ChatResult<Vec<SessionSummary>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXT) {
                continue;
            }

            let header = match tokio::fs::read_to_string(&path).await {
                Ok(content) => serde_json::from_str::<RecordHeader>(&content),
                Err(e) => {
                    tracing::warn!("Skipping unreadable record {}: {}", path.display(), e);
                    continue;
                }
            };
            let header = match header {
                Ok(header) => header,
                Err(e) => {
                    tracing::warn!("Skipping malformed record {}: {}", path.display(), e);
                    continue;
                }
            };
            let Some(id) = id_from_path(&path).or(header.unique_id) else {
                tracing::warn!("Skipping record without id: {}", path.display());
                continue;
            };

            summaries.push(SessionSummary {
                id,
                name: header.name,
                persona_snippet: header
                    .persona_description
                    .chars()
                    .take(SNIPPET_CHARS)
                    .collect(),
                turn_count: header.messages.len(),
            });
        }

        summaries.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(summaries)
    }

    /// Remove a record. A record that is already gone is not an error.
    pub async fn delete(&self, id: Uuid) -> ChatResult<()> {
        let path = self.path_for(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!("Deleted session {}", id);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("Session {} already deleted", id);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
