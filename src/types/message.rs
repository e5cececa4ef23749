//! Message types for model communication.
//!
//! Messages use the chat-completions wire shape directly: a role, optional
//! text content, an optional reasoning trace, and for assistant turns an
//! ordered list of tool call requests.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallRequest>>,
    /// Set on `tool` messages: the request this message answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Set on `tool` messages: the tool that produced the content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Provider metadata. Never replayed back to the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_specific_fields: Option<serde_json::Value>,
}

impl Message {
    fn with_role(role: Role, content: Option<String>) -> Self {
        Self {
            role,
            content,
            reasoning_content: None,
            tool_calls: None,
            tool_call_id: None,
            name: None,
            provider_specific_fields: None,
        }
    }

    /// Create a system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self::with_role(Role::System, Some(text.into()))
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_role(Role::User, Some(text.into()))
    }

    /// Create an assistant message with text content.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, Some(text.into()))
    }

    /// Create an assistant message whose content may be absent.
    pub fn assistant_reply(content: Option<String>) -> Self {
        Self::with_role(Role::Assistant, content)
    }

    /// Create an assistant message that requests tool calls.
    pub fn assistant_tool_calls(content: Option<String>, calls: Vec<ToolCallRequest>) -> Self {
        let mut msg = Self::with_role(Role::Assistant, content);
        msg.tool_calls = Some(calls);
        msg
    }

    /// Create a tool result message answering `tool_call_id`.
    pub fn tool_result(
        name: impl Into<String>,
        tool_call_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let mut msg = Self::with_role(Role::Tool, Some(content.into()));
        msg.name = Some(name.into());
        msg.tool_call_id = Some(tool_call_id.into());
        msg
    }

    /// Attach a reasoning trace.
    pub fn with_reasoning(mut self, reasoning: Option<String>) -> Self {
        self.reasoning_content = reasoning;
        self
    }

    /// Text content, or the empty string when absent.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// True when content is absent or blank.
    pub fn is_content_empty(&self) -> bool {
        self.content
            .as_deref()
            .map(|c| c.trim().is_empty())
            .unwrap_or(true)
    }

    /// Tool calls requested by this message (empty when none).
    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        self.tool_calls.as_deref().unwrap_or(&[])
    }

    /// Whether this message asks for at least one tool call.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls().is_empty()
    }
}

/// Conversation role.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A tool call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallRequest {
    /// Provider-assigned identifier, unique within one completion response.
    pub id: String,
    #[serde(rename = "type", default = "default_call_type")]
    pub call_type: String,
    pub function: FunctionCall,
}

fn default_call_type() -> String {
    "function".to_string()
}

impl ToolCallRequest {
    /// Build a function call request with JSON-encoded arguments.
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: &serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: default_call_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.to_string(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// Function name plus serialized argument payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded argument object, exactly as the provider sent it.
    pub arguments: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_result_carries_correlation_fields() {
        let msg = Message::tool_result("echo", "call_1", "hi");
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.name.as_deref(), Some("echo"));
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(msg.text(), "hi");
    }

    #[test]
    fn serializes_in_chat_completions_shape() {
        let call = ToolCallRequest::function("call_1", "echo", &json!({"text": "hi"}));
        let msg = Message::assistant_tool_calls(None, vec![call]);
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(value["role"], "assistant");
        assert!(value["content"].is_null());
        assert_eq!(value["tool_calls"][0]["type"], "function");
        assert_eq!(value["tool_calls"][0]["function"]["arguments"], r#"{"text":"hi"}"#);
        assert!(value.get("reasoning_content").is_none());
    }

    #[test]
    fn missing_call_type_defaults_to_function() {
        let call: ToolCallRequest = serde_json::from_value(json!({
            "id": "c1",
            "function": {"name": "echo", "arguments": "{}"}
        }))
        .unwrap();
        assert_eq!(call.call_type, "function");
    }

    #[test]
    fn blank_content_counts_as_empty() {
        assert!(Message::assistant("  \n").is_content_empty());
        assert!(Message::assistant_tool_calls(None, vec![]).is_content_empty());
        assert!(!Message::assistant("answer").is_content_empty());
    }
}
