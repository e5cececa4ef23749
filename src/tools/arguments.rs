//! Typed access to tool call arguments.

use crate::error::DeepSearchError;

/// Wrapper around tool call arguments providing typed extraction.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// Parse the JSON-encoded payload of a tool call. An empty payload is
    /// treated as an empty object.
    pub fn parse(raw: &str) -> Result<Self, DeepSearchError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::new(serde_json::json!({})));
        }
        let value = serde_json::from_str::<serde_json::Value>(trimmed).map_err(|e| {
            DeepSearchError::InvalidArgument(format!("Failed to parse tool arguments: {e}"))
        })?;
        Ok(Self::new(value))
    }

    /// Get the raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, DeepSearchError> {
        self.value.get(key).and_then(|v| v.as_str()).ok_or_else(|| {
            DeepSearchError::InvalidArgument(format!("Missing string argument: {key}"))
        })
    }

    /// Get an optional string argument.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(|v| v.as_str())
    }

    /// Get a list of strings.
    pub fn get_str_list(&self, key: &str) -> Result<Vec<String>, DeepSearchError> {
        let items = self.value.get(key).and_then(|v| v.as_array()).ok_or_else(|| {
            DeepSearchError::InvalidArgument(format!("Missing array argument: {key}"))
        })?;
        items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    DeepSearchError::InvalidArgument(format!(
                        "Argument {key} must contain only strings"
                    ))
                })
            })
            .collect()
    }

    /// Get a boolean argument.
    pub fn get_bool(&self, key: &str) -> Result<bool, DeepSearchError> {
        self.value.get(key).and_then(|v| v.as_bool()).ok_or_else(|| {
            DeepSearchError::InvalidArgument(format!("Missing boolean argument: {key}"))
        })
    }

    /// Deserialize the entire arguments into a typed struct.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Result<T, DeepSearchError> {
        serde_json::from_value(self.value.clone()).map_err(|e| {
            DeepSearchError::InvalidArgument(format!("Failed to deserialize arguments: {e}"))
        })
    }
}
