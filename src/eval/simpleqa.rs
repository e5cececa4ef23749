//! Single-letter grader (A correct, B incorrect, C not attempted).

use std::sync::Arc;

use async_trait::async_trait;

use super::prompts::SIMPLEQA_PROMPT;
use super::{ask_grader, render_grader_prompt, Correctness, Evaluator, Grade};
use crate::cache::{CacheStore, Memo};
use crate::error::{DeepSearchError, Result};
use crate::provider::CompletionClient;
use crate::types::ModelConfig;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

pub struct SimpleQaEvaluator {
    name: String,
    client: Arc<dyn CompletionClient>,
    model_config: ModelConfig,
    system_prompt: bool,
    memo: Option<Memo>,
}

impl SimpleQaEvaluator {
    /// `model_config` carries the grader model and any extra request
    /// parameters.
    pub fn new(name: impl Into<String>, client: Arc<dyn CompletionClient>, model_config: ModelConfig) -> Self {
        Self {
            name: name.into(),
            client,
            model_config,
            system_prompt: true,
            memo: None,
        }
    }

    /// Send only the grading prompt, with no system message.
    pub fn without_system_prompt(mut self) -> Self {
        self.system_prompt = false;
        self
    }

    pub fn with_cache(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.memo = Some(Memo::new(store, format!("grade:{}", self.name)));
        self
    }

    async fn grade_uncached(&self, query: &str, target: &str, response: &str) -> Result<Grade> {
        let prompt = render_grader_prompt(SIMPLEQA_PROMPT, query, target, response);
        let system = self.system_prompt.then_some(SYSTEM_PROMPT);
        let out = ask_grader(self.client.as_ref(), &self.model_config, system, prompt).await?;
        parse_letter_grade(&out)
    }
}

/// Normalize grader output (trimmed, uppercased) and map the letter.
///
/// Output that is not exactly one character breaks the grader contract.
pub(crate) fn parse_letter_grade(out: &str) -> Result<Grade> {
    let decision = out.trim().to_uppercase();
    if decision.chars().count() != 1 {
        return Err(DeepSearchError::contract(format!(
            "Grader must answer with a single letter, got {decision:?}"
        )));
    }

    let correct = match decision.as_str() {
        "A" => Correctness::Correct,
        "B" | "C" => Correctness::Incorrect,
        _ => Correctness::FormatError,
    };
    Ok(Grade {
        raw: decision.clone(),
        explanation: "<not provided>".to_string(),
        decision,
        correct,
    })
}

#[async_trait]
impl Evaluator for SimpleQaEvaluator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn grade(&self, query: &str, target: &str, response: &str) -> Result<Grade> {
        match &self.memo {
            Some(memo) => {
                let args = serde_json::json!({
                    "model": self.model_config,
                    "system_prompt": self.system_prompt,
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
