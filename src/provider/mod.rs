//! Completion client trait and implementations.

pub mod cached;
pub mod http;
pub mod sanitize;

#[cfg(feature = "openai")]
pub mod openai;

pub use cached::CachedCompletionClient;
#[cfg(feature = "openai")]
pub use openai::OpenAiChatClient;
pub use sanitize::strip_volatile_fields;

use async_trait::async_trait;

use crate::error::DeepSearchError;
use crate::tools::ToolSignature;
use crate::types::{Message, ModelConfig};

/// Remote chat-completion collaborator.
///
/// `config` is passed through to the endpoint unmodified. The returned
/// assistant message may carry tool call requests.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        config: &ModelConfig,
        messages: &[Message],
        tools: &[ToolSignature],
    ) -> Result<Message, DeepSearchError>;
}

#[async_trait]
impl<T: CompletionClient + ?Sized> CompletionClient for std::sync::Arc<T> {
    async fn complete(
        &self,
        config: &ModelConfig,
        messages: &[Message],
        tools: &[ToolSignature],
    ) -> Result<Message, DeepSearchError> {
        (**self).complete(config, messages, tools).await
    }
}
