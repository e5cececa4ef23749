//! Hosted Jina DeepSearch baseline agent.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::Agent;
use crate::cache::{CacheStore, Memo};
use crate::config::{Config, JINA, JINA_DEEPSEARCH};
use crate::error::{DeepSearchError, Result};
use crate::provider::http::{bearer_headers, join_url, shared_client, status_to_error};
use crate::types::Message;

const DEFAULT_BASE_URL: &str = "https://deepsearch.jina.ai";
pub const DEFAULT_JINA_MODEL: &str = "jina-deepsearch-v2";

/// Sends the query to Jina's DeepSearch chat endpoint in one call and
/// returns a `[user, assistant]` trace.
#[derive(Clone)]
pub struct JinaDeepsearchAgent {
    api_key: String,
    base_url: String,
    model: String,
    memo: Option<Memo>,
}

impl std::fmt::Debug for JinaDeepsearchAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinaDeepsearchAgent")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("cached", &self.memo.is_some())
            .finish()
    }
}

impl JinaDeepsearchAgent {
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: DEFAULT_JINA_MODEL.to_string(),
            memo: None,
        }
    }

    /// Requires `JINA_API_KEY`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key(JINA, "JINA_API_KEY")?;
        Ok(Self::new(api_key, config.get_base_url(JINA_DEEPSEARCH)))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_cache(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.memo = Some(Memo::new(store, "agent/jina_deepsearch"));
        self
    }

    /// The hosted answer for `query`.
    pub async fn answer(&self, query: &str) -> Result<String> {
        match &self.memo {
            Some(memo) => {
                let args = json!({ "query": query, "model": self.model });
                memo.get_or_compute(&args, || self.fetch(query)).await
            }
            None => self.fetch(query).await,
        }
    }

    async fn fetch(&self, query: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": query }],
            "stream": false,
            "reasoning_effort": "medium",
            "max_attempts": 1,
            "no_direct_answer": false,
        });

        debug!(model = %self.model, "jina deepsearch");
        let resp = shared_client()
            .post(join_url(&self.base_url, "v1/chat/completions"))
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let text = resp.text().await?;
        if status != 200 {
            return Err(status_to_error(status, &text));
        }

        let payload: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            DeepSearchError::InvalidResponse(format!("Malformed deepsearch body: {e}"))
        })?;
        payload
            .pointer("/choices/0/message/content")
            .and_then(|content| content.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                DeepSearchError::InvalidResponse("Deepsearch response has no answer".into())
            })
    }
}

#[async_trait]
impl Agent for JinaDeepsearchAgent {
    async fn run(&self, query: &str) -> Result<Vec<Message>> {
        let answer = self.answer(query).await?;
        Ok(vec![Message::user(query), Message::assistant(answer)])
    }
}
