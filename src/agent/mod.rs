//! Research agents.

#[cfg(feature = "web")]
pub mod jina;
pub mod prompt;
pub mod simple;
pub mod tool_call;

#[cfg(feature = "web")]
pub use jina::JinaDeepsearchAgent;
pub use simple::SimpleAgent;
pub use tool_call::{ToolCallAgent, DEFAULT_MAX_ITERS};

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::types::Message;

/// Answers one query, returning the full conversation trace.
///
/// The last message's content is the answer.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn run(&self, query: &str) -> Result<Vec<Message>>;
}

/// Emit one message as an info event.
pub(crate) fn log_message(message: &Message) {
    let calls: Vec<String> = message
        .tool_calls()
        .iter()
        .map(|call| format!("{}({})", call.function.name, call.function.arguments))
        .collect();
    info!(
        role = %message.role,
        name = message.name.as_deref().unwrap_or_default(),
        reasoning = message.reasoning_content.as_deref().unwrap_or_default(),
        content = message.text(),
        tool_calls = ?calls,
        "message"
    );
}
