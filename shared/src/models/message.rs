use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Character,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Character => f.write_str("character"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Display name of the character that spoke this turn
    pub character: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_path: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            character: None,
            avatar_path: None,
        }
    }

    /// Create a character turn carrying its display metadata, so a record
    /// renders the same even after the character is renamed.
    pub fn from_character(
        content: impl Into<String>,
        name: impl Into<String>,
        avatar_path: Option<String>,
    ) -> Self {
        Self {
            role: Role::Character,
            content: content.into(),
            character: Some(name.into()),
            avatar_path,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SendMessageResponse {
    pub reply: String,
    /// False when the model produced nothing and the fallback reply was used
    pub recorded: bool,
}
