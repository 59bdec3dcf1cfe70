use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: Uuid,
    pub name: String,
    pub persona_description: String,
    pub greeting: String,
    #[serde(default)]
    /// Path or URI of the avatar image; the UI shows a placeholder when absent
    pub avatar_reference: Option<String>,
    pub model_identifier: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub persona_description: String,
    pub greeting: String,
    #[serde(default)]
    pub avatar_reference: Option<String>,
    #[serde(default)]
    /// Resolved from the available models when not given
    pub model_identifier: Option<String>,
}

/// Partial update. Absent or blank fields leave the current value in place.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UpdateCharacterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub persona_description: Option<String>,
    #[serde(default)]
    pub greeting: Option<String>,
    #[serde(default)]
    pub avatar_reference: Option<String>,
}
