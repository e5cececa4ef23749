//! Configuration system (layered: code > env > `.env` file).

pub mod models;

pub use models::ModelCatalog;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::error::{DeepSearchError, Result};

/// Default root for memoized results.
const DEFAULT_CACHE_DIR: &str = "./.cache";

/// Services that need credentials or endpoint overrides.
pub const OPENAI: &str = "openai";
pub const SERPAPI: &str = "serpapi";
pub const JINA: &str = "jina";
/// Endpoint override for the hosted DeepSearch agent; shares the `JINA` key.
pub const JINA_DEEPSEARCH: &str = "jina_deepsearch";

/// Credentials and endpoints for the completion and tool collaborators.
#[derive(Clone, Default)]
pub struct Config {
    api_keys: Arc<RwLock<HashMap<String, String>>>,
    base_urls: Arc<RwLock<HashMap<String, String>>>,
    cache_dir: Option<PathBuf>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let services: Vec<String> = self
            .api_keys
            .read()
            .map(|keys| keys.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("Config")
            .field("api_keys", &services)
            .field("base_urls", &self.base_urls)
            .field("cache_dir", &self.cache_dir)
            .finish()
    }
}

impl Config {
    /// Create empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables (OPENAI_API_KEY, SERPAPI_API_KEY, ...).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::new();

        let env_mappings = [
            ("OPENAI_API_KEY", OPENAI),
            ("SERPAPI_API_KEY", SERPAPI),
            ("JINA_API_KEY", JINA),
        ];
        for (env_var, service) in &env_mappings {
            if let Ok(key) = std::env::var(env_var) {
                config.set_api_key(service, key);
            }
        }

        let url_mappings = [
            ("OPENAI_BASE_URL", OPENAI),
            ("SERPAPI_BASE_URL", SERPAPI),
            ("JINA_READER_BASE_URL", JINA),
            ("JINA_DEEPSEARCH_BASE_URL", JINA_DEEPSEARCH),
        ];
        for (env_var, service) in &url_mappings {
            if let Ok(url) = std::env::var(env_var) {
                config.set_base_url(service, url);
            }
        }

        if let Ok(dir) = std::env::var("DEEPSEARCH_CACHE_DIR") {
            config.cache_dir = Some(PathBuf::from(dir));
        }

        config
    }

    pub fn set_api_key(&self, service: &str, key: String) {
        self.api_keys
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(service.to_string(), key);
    }

    pub fn get_api_key(&self, service: &str) -> Option<String> {
        self.api_keys.read().ok()?.get(service).cloned()
    }

    /// Resolve an API key, failing with a configuration error naming `env_var`.
    pub fn require_api_key(&self, service: &str, env_var: &str) -> Result<String> {
        self.get_api_key(service)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| DeepSearchError::Configuration(format!("{env_var} is not set")))
    }

    pub fn set_base_url(&self, service: &str, url: String) {
        self.base_urls
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(service.to_string(), url);
    }

    pub fn get_base_url(&self, service: &str) -> Option<String> {
        self.base_urls.read().ok()?.get(service).cloned()
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Root directory for disk caches.
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR))
    }
}
