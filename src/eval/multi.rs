//! Runs several evaluators over one answer and keeps a running tally.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tracing::info;

use super::{Evaluator, Grade};
use crate::error::Result;

#[derive(Debug, Default)]
struct Tally {
    n_correct: Vec<usize>,
    n_total: usize,
}

/// Grades each answer with every configured evaluator, in order.
///
/// Safe to share across concurrent benchmark runs: the tally is only
/// updated after all evaluators succeed for a given answer.
pub struct MultiEvaluator {
    evaluators: Vec<Arc<dyn Evaluator>>,
    tally: Mutex<Tally>,
    verbose: bool,
}

impl MultiEvaluator {
    pub fn new(evaluators: Vec<Arc<dyn Evaluator>>) -> Self {
        let tally = Tally {
            n_correct: vec![0; evaluators.len()],
            n_total: 0,
        };
        Self {
            evaluators,
            tally: Mutex::new(tally),
            verbose: true,
        }
    }

    /// Log the tally after every graded answer (on by default).
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.evaluators.iter().map(|e| e.name()).collect()
    }

    /// Grade one answer; returns evaluator name -> grade.
    pub async fn grade(&self, query: &str, target: &str, response: &str) -> Result<BTreeMap<String, Grade>> {
        let mut grades = Vec::with_capacity(self.evaluators.len());
        for evaluator in &self.evaluators {
            grades.push(evaluator.grade(query, target, response).await?);
        }

        {
            let mut tally = self.tally.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            for (count, grade) in tally.n_correct.iter_mut().zip(&grades) {
                if grade.correct.is_correct() {
                    *count += 1;
                }
            }
            tally.n_total += 1;
        }
        if self.verbose {
            info!("{}", self.summary());
        }

        Ok(self
            .evaluators
            .iter()
            .map(|e| e.name().to_string())
            .zip(grades)
            .collect())
    }

    /// Number of answers graded so far.
    pub fn total(&self) -> usize {
        self.tally.lock().map(|t| t.n_total).unwrap_or(0)
    }

    /// `E-name - 003/010 - 0.3000 | ...`
    ///
    /// Only `Correct` grades count as hits; a `<format_error>` grade is a
    /// miss, so these ratios can run lower than tallies that treat any
    /// non-false grade as correct.
    pub fn summary(&self) -> String {
        let tally = self.tally.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.evaluators
            .iter()
            .zip(&tally.n_correct)
            .map(|(evaluator, &correct)| {
                let ratio = if tally.n_total == 0 {
                    0.0
                } else {
                    correct as f64 / tally.n_total as f64
                };
                format!(
                    "E-{} - {:03}/{:03} - {:.4}",
                    evaluator.name(),
                    correct,
                    tally.n_total,
                    ratio
                )
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeepSearchError;
    use crate::eval::Correctness;
    use async_trait::async_trait;

    /// Grades correct when the response contains the target.
    struct Contains(&'static str);

    #[async_trait]
    impl Evaluator for Contains {
        fn name(&self) -> &str {
            self.0
        }

        async fn grade(&self, _query: &str, target: &str, response: &str) -> Result<Grade> {
            if response == "boom" {
                return Err(DeepSearchError::InvalidResponse("grader down".into()));
            }
            let hit = response.contains(target);
            Ok(Grade {
                raw: response.to_string(),
                explanation: String::new(),
                decision: if hit { "A" } else { "B" }.to_string(),
                correct: Correctness::from(hit),
            })
        }
    }

    #[tokio::test]
    async fn tallies_and_summarizes() {
        let multi = MultiEvaluator::new(vec![Arc::new(Contains("frames")), Arc::new(Contains("seal0"))])
            .with_verbose(false);

        let grades = multi.grade("q", "Paris", "It is Paris").await.unwrap();
        assert_eq!(grades.len(), 2);
        assert!(grades["frames"].correct.is_correct());
        multi.grade("q", "Paris", "London").await.unwrap();
        multi.grade("q", "Rome", "Rome").await.unwrap();

        assert_eq!(multi.total(), 3);
        assert_eq!(
            multi.summary(),
            "E-frames - 002/003 - 0.6667 | E-seal0 - 002/003 - 0.6667"
        );
    }

    #[tokio::test]
    async fn failed_grading_leaves_tally_untouched() {
        let multi = MultiEvaluator::new(vec![Arc::new(Contains("frames"))]).with_verbose(false);
        assert!(multi.grade("q", "t", "boom").await.is_err());
        assert_eq!(multi.total(), 0);
        assert_eq!(multi.summary(), "E-frames - 000/000 - 0.0000");
    }
}
