//! Model configuration passed through to the completion endpoint.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Models whose tool-calling endpoints reject mixed-case schema keys.
const LOWERCASE_SCHEMA_MODELS: &[&str] = &["gpt-4o", "o3-mini"];

/// Opaque model configuration: model id, reasoning hint, and any extra
/// request parameters. Passed to the completion client unmodified.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    #[builder(into)]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
    #[serde(default, flatten)]
    #[builder(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ModelConfig {
    /// Configuration with only a model id.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            reasoning_effort: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Builder-style extra parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn requires_lowercase_schema(&self) -> bool {
        LOWERCASE_SCHEMA_MODELS.contains(&self.model.as_str())
    }
}

/// Reasoning effort level for reasoning models.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    Medium,
    High,
}
