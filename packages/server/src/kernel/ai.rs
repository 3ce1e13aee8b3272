// AI implementation using OpenAI
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for) lives in domain layers.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient};
use tracing::debug;

use super::BaseAI;

/// Chat completions against a fixed model.
#[derive(Clone)]
pub struct OpenAIChat {
    client: OpenAIClient,
    model: String,
}

impl OpenAIChat {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl BaseAI for OpenAIChat {
    async fn chat(&self, session_id: &str, messages: Vec<Message>) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .messages(messages)
            .user(session_id);

        let response = self.client.chat_completion(request).await?;
        if let Some(usage) = &response.usage {
            debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Chat completion token usage"
            );
        }
        Ok(response.content)
    }
}
