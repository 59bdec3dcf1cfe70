use crate::avatars::AvatarStore;
use crate::config::BackendConfig;
use crate::context::SessionContext;
use crate::llm::LanguageModel;
use crate::store::SessionStore;
use shared::models::AppSettings;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub avatars: Arc<AvatarStore>,
    pub llm: Arc<dyn LanguageModel>,
    pub settings: Arc<AppSettings>,
    /// Single-operator session; turns are serialized through this lock
    pub context: Arc<Mutex<SessionContext>>,
}

impl AppState {
    pub fn new(config: BackendConfig, llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            store: Arc::new(SessionStore::new(config.chats_dir())),
            avatars: Arc::new(AvatarStore::new(config.avatars_dir())),
            llm,
            settings: Arc::new(config.settings),
            context: Arc::new(Mutex::new(SessionContext::default())),
        }
    }
}
