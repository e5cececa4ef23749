//! Single-completion baseline agent.

use std::sync::Arc;

use async_trait::async_trait;

use super::prompt::SIMPLE_SYSTEM_PROMPT;
use super::Agent;
use crate::error::Result;
use crate::provider::CompletionClient;
use crate::types::{Message, ModelConfig};

/// Answers from the model's own knowledge: one completion, no tools.
pub struct SimpleAgent {
    client: Arc<dyn CompletionClient>,
    model_config: ModelConfig,
    system_prompt: String,
}

impl SimpleAgent {
    pub fn new(client: Arc<dyn CompletionClient>, model_config: ModelConfig) -> Self {
        Self {
            client,
            model_config,
            system_prompt: SIMPLE_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }
}

#[async_trait]
impl Agent for SimpleAgent {
    async fn run(&self, query: &str) -> Result<Vec<Message>> {
        let mut messages = vec![Message::system(&self.system_prompt), Message::user(query)];
        let reply = self
            .client
            .complete(&self.model_config, &messages, &[])
            .await?;
        messages.push(Message::assistant_reply(reply.content).with_reasoning(reply.reasoning_content));
        Ok(messages)
    }
}
