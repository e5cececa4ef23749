//! Convenience re-exports for common use.

#[cfg(feature = "web")]
pub use crate::agent::JinaDeepsearchAgent;
pub use crate::agent::{Agent, SimpleAgent, ToolCallAgent};
pub use crate::cache::{CacheStore, DiskCache, MemoryCache};
pub use crate::config::{Config, ModelCatalog};
pub use crate::error::{DeepSearchError, Result};
pub use crate::eval::{Evaluator, Grade, MultiEvaluator};
pub use crate::provider::CompletionClient;
#[cfg(feature = "openai")]
pub use crate::provider::OpenAiChatClient;
pub use crate::tools::{AgentTool, Tool, ToolArguments, ToolParameters};
pub use crate::types::{Message, ModelConfig, Role};
