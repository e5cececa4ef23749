//! Tool results and their canonical text form.

use std::fmt;
use std::sync::Arc;

use crate::error::DeepSearchError;

/// Canonical text serialization for structured tool results.
pub trait ToText: Send + Sync {
    fn to_text(&self) -> String;
}

/// Value returned by a tool body.
#[derive(Clone)]
pub enum ToolOutput {
    /// Plain text, used as-is.
    Text(String),
    /// A structured result rendered through [`ToText`].
    Document(Arc<dyn ToText>),
    /// Raw JSON. Only a JSON string is accepted as text.
    Json(serde_json::Value),
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn document<T: ToText + 'static>(doc: T) -> Self {
        Self::Document(Arc::new(doc))
    }

    /// Normalize to the text placed into a tool message.
    ///
    /// Fails with a contract violation when the output is neither text nor
    /// text-serializable.
    pub fn into_text(self, tool_name: &str) -> Result<String, DeepSearchError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Document(doc) => Ok(doc.to_text()),
            Self::Json(serde_json::Value::String(text)) => Ok(text),
            Self::Json(other) => Err(DeepSearchError::contract(format!(
                "Tool {tool_name} returned {}, which is neither text nor text-serializable",
                json_type_name(&other)
            ))),
        }
    }
}

impl fmt::Debug for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Document(_) => f.write_str("Document(..)"),
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
        }
    }
}

impl From<String> for ToolOutput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ToolOutput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
