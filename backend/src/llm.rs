use crate::error::{ChatError, ChatResult};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use shared::models::AppSettings;
use std::time::Duration;

/// Preferred models, most preferred first.
pub const PREFERRED_MODELS: [&str; 4] = [
    "gemini-1.5-flash",
    "gemini-1.5-pro",
    "gemini-pro",
    "gemini-1.0-pro",
];

/// A hosted language model. One prompt in, generated text out.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> ChatResult<String>;
    async fn list_models(&self) -> ChatResult<Vec<String>>;
}

/// Client for any OpenAI-compatible chat completions endpoint.
pub struct OpenAiCompatibleModel {
    client: Client<OpenAIConfig>,
    has_key: bool,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAiCompatibleModel {
    pub fn new(settings: &AppSettings) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(settings.api_key.clone())
            .with_api_base(settings.api_base.trim_end_matches('/'));

        Self {
            client: Client::with_config(config),
            has_key: !settings.api_key.is_empty(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            timeout: Duration::from_secs(settings.request_timeout_secs.max(1)),
        }
    }

    fn ensure_key(&self) -> ChatResult<()> {
        if self.has_key {
            Ok(())
        } else {
            Err(ChatError::Generation("Missing API key".to_string()))
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAiCompatibleModel {
    async fn generate(&self, model: &str, prompt: &str) -> ChatResult<String> {
        self.ensure_key()?;

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;
        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(self.temperature)
            .max_completion_tokens(self.max_tokens)
            .build()?;

        tracing::debug!("Sending {} prompt chars to {}", prompt.len(), model);
        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| {
                ChatError::Generation(format!(
                    "model call timed out after {}s",
                    self.timeout.as_secs()
                ))
            })??;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }

    async fn list_models(&self) -> ChatResult<Vec<String>> {
        self.ensure_key()?;

        let response = tokio::time::timeout(self.timeout, self.client.models().list())
            .await
            .map_err(|_| ChatError::Generation("model listing timed out".to_string()))??;
        Ok(response.data.into_iter().map(|m| m.id).collect())
    }
}

fn bare_name(model: &str) -> &str {
    model.strip_prefix("models/").unwrap_or(model)
}

/// Pick a model from what the provider reports: the first preferred one that
/// is available, else the first available, else `None`.
pub fn resolve_model(available: &[String]) -> Option<String> {
    PREFERRED_MODELS
        .iter()
        .find_map(|preferred| {
            available
                .iter()
                .find(|name| bare_name(name) == *preferred)
                .cloned()
        })
        .or_else(|| available.first().cloned())
}

/// Resolve a model for a new character, falling back to `default_model`
/// when listing fails or comes back empty.
pub async fn detect_model(llm: &dyn LanguageModel, default_model: &str) -> String {
    match llm.list_models().await {
        Ok(available) => match resolve_model(&available) {
            Some(model) => {
                tracing::info!("Using model: {}", model);
                model
            }
            None => {
                tracing::warn!("No models available, using {}", default_model);
                default_model.to_string()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to detect models: {}; using {}", e, default_model);
            default_model.to_string()
        }
    }
}
