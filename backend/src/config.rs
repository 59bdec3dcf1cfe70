use shared::models::AppSettings;
use std::path::{Path, PathBuf};

const CHATS_DIR: &str = "chats";
const AVATARS_DIR: &str = "avatars";

#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub data_dir: PathBuf,
    pub settings: AppSettings,
}

impl BackendConfig {
    pub fn new(data_dir: impl Into<PathBuf>, settings: AppSettings) -> Self {
        Self {
            data_dir: data_dir.into(),
            settings,
        }
    }

    pub fn chats_dir(&self) -> PathBuf {
        self.data_dir.join(CHATS_DIR)
    }

    pub fn avatars_dir(&self) -> PathBuf {
        self.data_dir.join(AVATARS_DIR)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(Path::new("data"), AppSettings::default())
    }
}
