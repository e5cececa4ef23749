//! Autograders comparing an agent's answer with a reference answer.

pub mod frames;
pub mod multi;
pub mod prompts;
pub mod simpleqa;

pub use frames::FramesEvaluator;
pub use multi::MultiEvaluator;
pub use simpleqa::SimpleQaEvaluator;

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cache::CacheStore;
use crate::error::{DeepSearchError, Result};
use crate::provider::CompletionClient;
use crate::types::{Message, ModelConfig};

/// Names accepted by [`preset`].
pub const PRESET_NAMES: &[&str] = &["frames", "seal0", "simpleqa", "ods"];

/// Grades one `(query, target, response)` triple.
///
/// Grading is idempotent for identical inputs; evaluators run over the same
/// triple are independent of each other.
#[async_trait]
pub trait Evaluator: Send + Sync {
    fn name(&self) -> &str;

    async fn grade(&self, query: &str, target: &str, response: &str) -> Result<Grade>;
}

/// Verdict of one evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Grader output as received (normalized where the grader defines it).
    pub raw: String,
    pub explanation: String,
    pub decision: String,
    pub correct: Correctness,
}

/// Serialized as `true`, `false` or `"<format_error>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correctness {
    Correct,
    Incorrect,
    /// The grader answered outside its decision vocabulary.
    FormatError,
}

const FORMAT_ERROR: &str = "<format_error>";

impl Correctness {
    pub fn is_correct(self) -> bool {
        self == Self::Correct
    }
}

impl From<bool> for Correctness {
    fn from(correct: bool) -> Self {
        if correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }
}

impl Serialize for Correctness {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Correct => serializer.serialize_bool(true),
            Self::Incorrect => serializer.serialize_bool(false),
            Self::FormatError => serializer.serialize_str(FORMAT_ERROR),
        }
    }
}

impl<'de> Deserialize<'de> for Correctness {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Marker(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(flag) => Ok(flag.into()),
            Repr::Marker(marker) if marker == FORMAT_ERROR => Ok(Self::FormatError),
            Repr::Marker(other) => Err(serde::de::Error::custom(format!(
                "expected a boolean or {FORMAT_ERROR}, got {other}"
            ))),
        }
    }
}

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(QUERY|TARGET|RESPONSE)\}").expect("grader placeholder regex must compile")
});

/// Fill a grader prompt template in a single pass, so placeholder-like text
/// inside the inputs is left alone.
pub(crate) fn render_grader_prompt(template: &str, query: &str, target: &str, response: &str) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &regex::Captures<'_>| match &caps[1] {
            "QUERY" => query,
            "TARGET" => target,
            _ => response,
        })
        .trim()
        .to_string()
}

/// Send one grading request and return the grader's text.
pub(crate) async fn ask_grader(
    client: &dyn CompletionClient,
    config: &ModelConfig,
    system_prompt: Option<&str>,
    prompt: String,
) -> Result<String> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system_prompt {
        messages.push(Message::system(system));
    }
    messages.push(Message::user(prompt));

    let reply = client.complete(config, &messages, &[]).await?;
    reply
        .content
        .ok_or_else(|| DeepSearchError::InvalidResponse("Grader returned no content".into()))
}

/// Build a named evaluator preset, memoizing verdicts when `cache` is given.
///
/// - `frames`: explanation + TRUE/FALSE decision
/// - `seal0`: single-letter grading with gpt-4o-mini
/// - `simpleqa`: single-letter grading with gpt-4.1, `max_tokens = 2048`
/// - `ods`: single-letter grading with gemini-2.0-flash, no system prompt,
///   `temperature = 0`
pub fn preset(
    name: &str,
    client: Arc<dyn CompletionClient>,
    cache: Option<Arc<dyn CacheStore>>,
) -> Result<Arc<dyn Evaluator>> {
    if name == "frames" {
        let mut evaluator = FramesEvaluator::new(client);
        if let Some(store) = cache {
            evaluator = evaluator.with_cache(store);
        }
        return Ok(Arc::new(evaluator));
    }

    let mut evaluator = match name {
        "seal0" => SimpleQaEvaluator::new("seal0", client, ModelConfig::new("gpt-4o-mini")),
        "simpleqa" => SimpleQaEvaluator::new(
            "simpleqa",
            client,
            ModelConfig::new("gpt-4.1-2025-04-14").with_param("max_tokens", 2048.into()),
        ),
        "ods" => SimpleQaEvaluator::new(
            "ods",
            client,
            ModelConfig::new("gemini/gemini-2.0-flash-001").with_param("temperature", 0.0.into()),
        )
        .without_system_prompt(),
        other => {
            return Err(DeepSearchError::Configuration(format!(
                "Unknown evaluator: {other} (expected one of {})",
                PRESET_NAMES.join(", ")
            )))
        }
    };
    if let Some(store) = cache {
        evaluator = evaluator.with_cache(store);
    }
    Ok(Arc::new(evaluator))
}
