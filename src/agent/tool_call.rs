//! Tool-calling agent: a bounded completion/tool loop with one optional
//! self-review round.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::prompt::{render_system_prompt, DOUBLE_CHECK_PROMPT, TOOL_CALL_SYSTEM_PROMPT};
use super::{log_message, Agent};
use crate::error::Result;
use crate::provider::{strip_volatile_fields, CompletionClient};
use crate::tools::{Tool, ToolBox};
use crate::types::{Message, ModelConfig, ToolCallRequest};

/// Default turn budget.
pub const DEFAULT_MAX_ITERS: usize = 100;

/// Drives a conversation between a model and a tool set until the model
/// gives a final answer or the turn budget runs out.
///
/// Each turn sends the sanitized history and every tool signature. Tool
/// calls from one turn run concurrently and their results are appended in
/// request order. With double-check enabled, the first final answer is
/// followed by one review request; the next final answer ends the run.
pub struct ToolCallAgent {
    client: Arc<dyn CompletionClient>,
    model_config: ModelConfig,
    toolbox: ToolBox,
    prompt_template: String,
    special_instructions: Option<String>,
    double_check: bool,
    max_iters: usize,
    verbose: bool,
}

impl ToolCallAgent {
    /// Create an agent; tool signatures are case-folded when the model
    /// requires it.
    pub fn new(
        client: Arc<dyn CompletionClient>,
        model_config: ModelConfig,
        tools: Vec<Arc<dyn Tool>>,
    ) -> Result<Self> {
        let toolbox = ToolBox::new(tools, model_config.requires_lowercase_schema())?;
        Ok(Self {
            client,
            model_config,
            toolbox,
            prompt_template: TOOL_CALL_SYSTEM_PROMPT.to_string(),
            special_instructions: None,
            double_check: false,
            max_iters: DEFAULT_MAX_ITERS,
            verbose: false,
        })
    }

    /// Free-text instructions appended to the system prompt.
    pub fn with_special_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.special_instructions = Some(instructions.into());
        self
    }

    pub fn with_double_check(mut self, enabled: bool) -> Self {
        self.double_check = enabled;
        self
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Log every message at info level as the run progresses.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Replace the system prompt template. `{TOOLS}` is substituted with
    /// the tool listing.
    pub fn with_prompt_template(mut self, template: impl Into<String>) -> Self {
        self.prompt_template = template.into();
        self
    }

    pub fn toolbox(&self) -> &ToolBox {
        &self.toolbox
    }

    pub fn model_config(&self) -> &ModelConfig {
        &self.model_config
    }

    /// Rendered system prompt.
    pub fn system_prompt(&self) -> String {
        render_system_prompt(
            &self.prompt_template,
            self.toolbox
                .signatures()
                .iter()
                .map(|sig| (sig.name(), sig.description())),
            self.special_instructions.as_deref(),
        )
    }

    /// Run every call concurrently; results come back in request order.
    /// The first failure (in request order) aborts the turn once all
    /// siblings have finished.
    async fn dispatch(&self, calls: &[ToolCallRequest]) -> Result<Vec<Message>> {
        let runs = calls.iter().map(|call| self.toolbox.run(call));
        futures::future::join_all(runs).await.into_iter().collect()
    }

    fn trace(&self, message: &Message) {
        if self.verbose {
            log_message(message);
        }
    }
}

#[async_trait]
impl Agent for ToolCallAgent {
    async fn run(&self, query: &str) -> Result<Vec<Message>> {
        let mut messages = vec![Message::system(self.system_prompt()), Message::user(query)];
        for message in &messages {
            self.trace(message);
        }

        let mut double_check_completed = false;
        for iteration in 0..self.max_iters {
            debug!(iteration, messages = messages.len(), "requesting completion");
            let reply = self
                .client
                .complete(
                    &self.model_config,
                    &strip_volatile_fields(&messages),
                    self.toolbox.signatures(),
                )
                .await?;
            self.trace(&reply);

            if reply.has_tool_calls() {
                let calls = reply.tool_calls().to_vec();
                messages.push(
                    Message::assistant_tool_calls(reply.content, calls.clone())
                        .with_reasoning(reply.reasoning_content),
                );

                let results = self.dispatch(&calls).await?;
                for result in &results {
                    self.trace(result);
                }
                messages.extend(results);
                continue;
            }

            messages.push(
                Message::assistant_reply(reply.content).with_reasoning(reply.reasoning_content),
            );

            if !self.double_check || double_check_completed {
                break;
            }
            double_check_completed = true;
            let review = Message::user(DOUBLE_CHECK_PROMPT);
            self.trace(&review);
            messages.push(review);
        }

        // Drops the empty turn and its predecessor, but never the seed system
        // and user messages, so a bare `[system, user, empty]` loses only one.
        if messages.len() > 2 && messages.last().is_some_and(Message::is_content_empty) {
            let keep = messages.len().saturating_sub(2).max(2);
            warn!(
                dropped = messages.len() - keep,
                "final message has no content, rolling back"
            );
            messages.truncate(keep);
        }

        if self.verbose {
            info!(messages = messages.len(), "run finished");
        }
        Ok(messages)
    }
}

impl std::fmt::Debug for ToolCallAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolCallAgent")
            .field("model", &self.model_config.model)
            .field("toolbox", &self.toolbox)
            .field("double_check", &self.double_check)
            .field("max_iters", &self.max_iters)
            .finish()
    }
}
