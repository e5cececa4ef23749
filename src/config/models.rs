//! Named model configurations, loadable from TOML.
//!
//! ```toml
//! [models."gpt-4.1"]
//! model = "gpt-4.1"
//! max_tokens = 2048
//!
//! [models."gemini/gemini-2.5-flash-preview-05-20"]
//! model = "gemini/gemini-2.5-flash-preview-05-20"
//! reasoning_effort = "medium"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{DeepSearchError, Result};
use crate::types::{ModelConfig, ReasoningEffort};

/// Model used when none is named.
pub const DEFAULT_MODEL: &str = "gemini/gemini-2.5-flash-preview-05-20";

/// Lookup table from a model name to its request configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelCatalog {
    #[serde(default)]
    models: BTreeMap<String, ModelConfig>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        let mut models = BTreeMap::new();
        models.insert(
            DEFAULT_MODEL.to_string(),
            ModelConfig::builder()
                .model(DEFAULT_MODEL)
                .reasoning_effort(ReasoningEffort::Medium)
                .build(),
        );
        Self { models }
    }
}

impl ModelCatalog {
    /// Parse a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| DeepSearchError::Configuration(format!("Invalid model catalog: {e}")))
    }

    /// Load a catalog file; entries extend the built-in defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            DeepSearchError::Configuration(format!("Cannot read {}: {e}", path.display()))
        })?;
        let mut catalog = Self::default();
        catalog.models.extend(Self::from_toml_str(&text)?.models);
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Result<ModelConfig> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| DeepSearchError::Configuration(format!("Unknown model: {name}")))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }
}
