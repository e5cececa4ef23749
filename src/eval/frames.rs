//! Explanation/decision grader.

use std::sync::Arc;

use async_trait::async_trait;

use super::prompts::FRAMES_PROMPT;
use super::{ask_grader, render_grader_prompt, Correctness, Evaluator, Grade};
use crate::cache::{CacheStore, Memo};
use crate::error::{DeepSearchError, Result};
use crate::provider::CompletionClient;
use crate::types::ModelConfig;

const DEFAULT_MODEL: &str = "gemini/gemini-2.5-pro-preview-06-05";
const SYSTEM_PROMPT: &str = "You are a helpful assistant";

/// Asks the grader for an explanation and a `TRUE`/`FALSE` decision.
pub struct FramesEvaluator {
    client: Arc<dyn CompletionClient>,
    model_config: ModelConfig,
    memo: Option<Memo>,
}

impl FramesEvaluator {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            model_config: ModelConfig::new(DEFAULT_MODEL),
            memo: None,
        }
    }

    pub fn with_model(mut self, model_config: ModelConfig) -> Self {
        self.model_config = model_config;
        self
    }

    pub fn with_cache(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.memo = Some(Memo::new(store, "grade:frames"));
        self
    }

    async fn grade_uncached(&self, query: &str, target: &str, response: &str) -> Result<Grade> {
        let prompt = render_grader_prompt(FRAMES_PROMPT, query, target, response);
        let out = ask_grader(self.client.as_ref(), &self.model_config, Some(SYSTEM_PROMPT), prompt).await?;
        parse_frames_output(out)
    }
}

/// Split grader output into explanation and decision.
///
/// The decision is the text after the first `Decision:` marker (up to any
/// repeated marker); the explanation is the text between `Explanation:` and
/// `Decision:`.
pub(crate) fn parse_frames_output(out: String) -> Result<Grade> {
    let decision = out
        .split("Decision:")
        .nth(1)
        .ok_or_else(|| DeepSearchError::InvalidResponse(format!("Grader output has no Decision: {out}")))?
        .trim()
        .to_string();
    let explanation = out
        .split("Explanation:")
        .nth(1)
        .and_then(|rest| rest.split("Decision:").next())
        .ok_or_else(|| DeepSearchError::InvalidResponse(format!("Grader output has no Explanation: {out}")))?
        .trim()
        .to_string();

    let correct = Correctness::from(decision == "TRUE");
    Ok(Grade {
        raw: out,
        explanation,
        decision,
        correct,
    })
}

#[async_trait]
impl Evaluator for FramesEvaluator {
    fn name(&self) -> &str {
        "frames"
    }

    async fn grade(&self, query: &str, target: &str, response: &str) -> Result<Grade> {
        match &self.memo {
            Some(memo) => {
                let args = serde_json::json!({
                    "model": self.model_config,
                    "query": query,
                    "target": target,
                    "response": response,
                });
                memo.get_or_compute(&args, || self.grade_uncached(query, target, response))
                    .await
            }
            None => self.grade_uncached(query, target, response).await,
        }
    }
}
