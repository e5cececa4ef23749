//! Memoizing completion client.

use std::sync::Arc;

use async_trait::async_trait;

use super::sanitize::strip_volatile_fields;
use super::CompletionClient;
use crate::cache::{CacheStore, Memo};
use crate::error::DeepSearchError;
use crate::tools::ToolSignature;
use crate::types::{Message, ModelConfig};

/// Wraps a completion client with content-addressed caching.
///
/// The key covers the model config, the sanitized transcript and the tool
/// signatures, so replaying a query against a warm cache reproduces the
/// same trace without network calls.
pub struct CachedCompletionClient<C> {
    inner: C,
    memo: Memo,
}

impl<C: CompletionClient> CachedCompletionClient<C> {
    pub fn new(inner: C, store: Arc<dyn CacheStore>) -> Self {
        Self {
            inner,
            memo: Memo::new(store, "completion"),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: CompletionClient> CompletionClient for CachedCompletionClient<C> {
    async fn complete(
        &self,
        config: &ModelConfig,
        messages: &[Message],
        tools: &[ToolSignature],
    ) -> Result<Message, DeepSearchError> {
        let args = serde_json::json!({
            "config": config,
            "messages": strip_volatile_fields(messages),
            "tools": tools,
        });
        self.memo
            .get_or_compute(&args, || self.inner.complete(config, messages, tools))
            .await
    }
}
