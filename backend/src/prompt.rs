use shared::models::{Character, ChatMessage, Role};

/// How many trailing turns are rendered into each prompt.
pub const HISTORY_WINDOW: usize = 6;

/// Speaker label for user turns.
pub const USER_LABEL: &str = "Usuario";

pub const NO_HISTORY: &str = "No prior conversation history.";

const RULES: [&str; 6] = [
    "Always answer in the first person as {name}",
    "Keep your personality in every reply",
    "Stay consistent with your character and way of speaking",
    "Never break character under any circumstances",
    "Use natural, conversational language",
    "Limit your replies to 2-3 paragraphs at most",
];

fn speaker_label<'a>(message: &'a ChatMessage, character: &'a Character) -> &'a str {
    match message.role {
        Role::User => USER_LABEL,
        Role::Character => message.character.as_deref().unwrap_or(&character.name),
    }
}

/// Render the last `HISTORY_WINDOW` turns, oldest first, one `role: content`
/// line each.
pub fn render_history(character: &Character, messages: &[ChatMessage]) -> String {
    if messages.is_empty() {
        return NO_HISTORY.to_string();
    }

    let start = messages.len().saturating_sub(HISTORY_WINDOW);
    let mut history = String::new();
    for message in &messages[start..] {
        history.push_str(&format!(
            "{}: {}\n",
            speaker_label(message, character),
            message.content
        ));
    }
    history
}

/// Build the instruction text for the model. Deterministic for a given
/// character and log.
pub fn compose_prompt(character: &Character, messages: &[ChatMessage]) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!(
        "You are {}. {}\n",
        character.name, character.persona_description
    ));

    prompt.push_str("\nImportant rules:\n");
    for rule in RULES {
        prompt.push_str(&format!("- {}\n", rule.replace("{name}", &character.name)));
    }

    prompt.push_str("\nConversation history:\n");
    prompt.push_str(&render_history(character, messages));
    prompt
}

/// The full text sent to the model for one user message.
pub fn build_request(prompt: &str, character: &Character, user_message: &str) -> String {
    format!(
        "{}\n\n{}: {}\n\n{}:",
        prompt, USER_LABEL, user_message, character.name
    )
}
