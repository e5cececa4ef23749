//! Shared test helpers and a scripted completion client.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use deepsearch::error::DeepSearchError;
use deepsearch::provider::CompletionClient;
use deepsearch::tools::{AgentTool, Tool, ToolOutput, ToolParameters, ToolSignature};
use deepsearch::types::*;

/// One captured `complete` call.
#[derive(Debug, Clone)]
pub struct Request {
    pub config: ModelConfig,
    pub messages: Vec<Message>,
    pub tools: Vec<ToolSignature>,
}

/// A completion client that replays queued replies in order and records
/// every request it receives.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<Message, DeepSearchError>>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a final text answer.
    pub fn queue_response(&self, text: &str) -> &Self {
        self.queue(Message::assistant(text))
    }

    /// Queue a reply with no content at all.
    pub fn queue_empty(&self) -> &Self {
        self.queue(Message::assistant_reply(None))
    }

    /// Queue a reply requesting one tool call.
    pub fn queue_tool_call(&self, id: &str, name: &str, args: serde_json::Value) -> &Self {
        self.queue_tool_calls(&[(id, name, args)])
    }

    /// Queue a reply requesting several tool calls at once.
    pub fn queue_tool_calls(&self, calls: &[(&str, &str, serde_json::Value)]) -> &Self {
        let calls = calls
            .iter()
            .map(|(id, name, args)| ToolCallRequest::function(*id, *name, args))
            .collect();
        self.queue(Message::assistant_tool_calls(None, calls))
    }

    /// Queue an arbitrary reply.
    pub fn queue(&self, message: Message) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(message));
        self
    }

    /// Queue a failed completion.
    pub fn queue_error(&self, error: DeepSearchError) -> &Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(
        &self,
        config: &ModelConfig,
        messages: &[Message],
        tools: &[ToolSignature],
    ) -> Result<Message, DeepSearchError> {
        self.requests.lock().unwrap().push(Request {
            config: config.clone(),
            messages: messages.to_vec(),
            tools: tools.to_vec(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DeepSearchError::InvalidResponse("script exhausted".into())))
    }
}

/// `echo(text)`: returns its input.
pub fn echo_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "echo",
        "Echo the input text",
        ToolParameters::object().string("text", "Text to echo", true).build(),
        |args| async move { Ok(ToolOutput::text(args.get_str("text")?)) },
    ))
}

/// `sleep(ms, label)`: waits `ms` milliseconds, then returns `label`.
pub fn sleep_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "sleep",
        "Wait, then return the label",
        ToolParameters::object()
            .number("ms", "Milliseconds to wait", true)
            .string("label", "Label to return", true)
            .build(),
        |args| async move {
            let ms = args.raw()["ms"].as_u64().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Ok(ToolOutput::text(args.get_str("label")?))
        },
    ))
}

/// `fail()`: always errors.
pub fn failing_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "fail",
        "Always fails",
        ToolParameters::empty(),
        |_| async { Err(DeepSearchError::tool("fail", "upstream unavailable")) },
    ))
}

pub fn model() -> ModelConfig {
    ModelConfig::new("test-model")
}
