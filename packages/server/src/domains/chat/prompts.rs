//! Provider prompt for the support chat.

use openai_client::Message;

use crate::domains::chat::models::ChatMessage;

pub const SYSTEM_PROMPT: &str = "You are a compassionate mental health support assistant for students. Provide empathetic, supportive responses while maintaining appropriate boundaries. Encourage professional help when needed. Be warm, understanding, and non-judgmental. Keep responses concise but meaningful.";

/// Build the provider conversation: system prompt, prior turns oldest first,
/// then the new user text.
pub fn build_conversation(history: &[ChatMessage], text: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 2);
    messages.push(Message::system(SYSTEM_PROMPT));
    for turn in history {
        messages.push(Message::user(turn.message.as_str()));
        messages.push(Message::assistant(turn.response.as_str()));
    }
    messages.push(Message::user(text));
    messages
}
