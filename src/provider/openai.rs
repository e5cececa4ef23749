//! OpenAI-compatible Chat Completions client.
//!
//! Works against api.openai.com or any proxy speaking the same wire format
//! (LiteLLM and friends), which is how non-OpenAI models are reached.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::{Config, OPENAI};
use crate::error::DeepSearchError;
use crate::tools::ToolSignature;
use crate::types::{Message, ModelConfig};

use super::http::{bearer_headers, join_url, shared_client, status_to_error};
use super::CompletionClient;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    api_key: String,
    base_url: String,
}

impl OpenAiChatClient {
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Build from config; fails before any network activity when
    /// `OPENAI_API_KEY` is missing.
    pub fn from_config(config: &Config) -> Result<Self, DeepSearchError> {
        let api_key = config.require_api_key(OPENAI, "OPENAI_API_KEY")?;
        Ok(Self::new(api_key, config.get_base_url(OPENAI)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request_body(
        &self,
        config: &ModelConfig,
        messages: &[Message],
        tools: &[ToolSignature],
    ) -> Result<serde_json::Value, DeepSearchError> {
        let mut body = serde_json::Map::new();
        for (key, value) in &config.extra {
            body.insert(key.clone(), value.clone());
        }
        body.insert("model".into(), config.model.clone().into());
        if let Some(effort) = config.reasoning_effort {
            body.insert("reasoning_effort".into(), effort.to_string().into());
        }
        body.insert("messages".into(), serde_json::to_value(messages)?);
        if !tools.is_empty() {
            body.insert("tools".into(), serde_json::to_value(tools)?);
        }
        Ok(serde_json::Value::Object(body))
    }
}

#[async_trait]
impl CompletionClient for OpenAiChatClient {
    async fn complete(
        &self,
        config: &ModelConfig,
        messages: &[Message],
        tools: &[ToolSignature],
    ) -> Result<Message, DeepSearchError> {
        let body = self.build_request_body(config, messages, tools)?;
        let url = join_url(&self.base_url, "chat/completions");

        debug!(
            model = %config.model,
            messages = messages.len(),
            tools = tools.len(),
            "chat completion"
        );

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let text = resp.text().await?;
        let data: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            DeepSearchError::InvalidResponse(format!("Malformed completion body: {e}"))
        })?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DeepSearchError::InvalidResponse("No choices in completion response".into()))?;

        let mut message = choice.message;
        if message.tool_calls.as_ref().is_some_and(Vec::is_empty) {
            message.tool_calls = None;
        }
        Ok(message)
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Message,
}
