//! Benchmark driver: runs an agent over many queries concurrently, grades
//! each answer and persists one record per successful query.

pub mod dataset;
pub mod record;

pub use dataset::{load_dataset, load_jsonl, sample_items, DatasetItem, DatasetKind};
pub use record::{content_hash, RunRecord};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use bon::Builder;
use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::agent::Agent;
use crate::error::{DeepSearchError, Result};
use crate::eval::MultiEvaluator;

/// Explicit session configuration; nothing is read from ambient state.
#[derive(Debug, Clone, Builder)]
pub struct BenchConfig {
    #[builder(into, default = PathBuf::from("results"))]
    pub output_root: PathBuf,
    #[builder(into)]
    pub dataset: String,
    #[builder(into)]
    pub agent_label: String,
    #[builder(into)]
    pub model_name: String,
    #[builder(default = 123)]
    pub seed: u64,
    /// Run only a seeded sample of this many items.
    pub sample: Option<usize>,
    /// Maximum number of queries in flight.
    #[builder(default = 8)]
    pub concurrency: usize,
}

/// Outcome counts for one benchmark run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BenchSummary {
    pub written: usize,
    pub failed: usize,
}

pub struct BenchSession {
    config: BenchConfig,
    outdir: PathBuf,
}

impl BenchSession {
    /// Create `<output_root>/<dataset>/<agent>/<model>`.
    pub fn new(config: BenchConfig) -> Result<Self> {
        if config.concurrency == 0 {
            return Err(DeepSearchError::Configuration(
                "concurrency must be at least 1".into(),
            ));
        }
        let outdir = config
            .output_root
            .join(&config.dataset)
            .join(&config.agent_label)
            .join(&config.model_name);
        std::fs::create_dir_all(&outdir)?;
        Ok(Self { config, outdir })
    }

    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Apply the configured sample, if any.
    pub fn select(&self, items: Vec<DatasetItem>) -> Vec<DatasetItem> {
        match self.config.sample {
            Some(n) => sample_items(&items, n, self.config.seed),
            None => items,
        }
    }

    /// Keep only the items whose query hashes to one of `mids`, for
    /// re-running single queries. An empty list keeps everything.
    pub fn retain_mids(&self, items: Vec<DatasetItem>, mids: &[String]) -> Vec<DatasetItem> {
        if mids.is_empty() {
            return items;
        }
        let kept: Vec<DatasetItem> = items
            .into_iter()
            .filter(|item| mids.contains(&content_hash(&item.query)))
            .collect();
        if kept.len() < mids.len() {
            warn!(requested = mids.len(), matched = kept.len(), "some record ids matched no query");
        }
        kept
    }

    /// Run every item, at most `concurrency` at a time.
    ///
    /// A failing query (agent or grader error) is logged and counted; no
    /// record is written for it and the other queries carry on. Failing to
    /// write a record is fatal.
    pub async fn run<A>(
        &self,
        agent: &A,
        evaluator: &MultiEvaluator,
        items: &[DatasetItem],
    ) -> Result<BenchSummary>
    where
        A: Agent + ?Sized,
    {
        let gate = Arc::new(Semaphore::new(self.config.concurrency));
        info!(
            queries = items.len(),
            concurrency = self.config.concurrency,
            outdir = %self.outdir.display(),
            "starting benchmark"
        );

        let mut pending: FuturesUnordered<_> = items
            .iter()
            .map(|item| {
                let gate = gate.clone();
                async move {
                    let _permit = gate
                        .acquire_owned()
                        .await
                        .map_err(|e| DeepSearchError::Configuration(format!("admission gate closed: {e}")))?;
                    run_one(agent, evaluator, item).await
                }
            })
            .collect();

        let mut summary = BenchSummary::default();
        while let Some(outcome) = pending.next().await {
            match outcome {
                Ok(record) => {
                    let path = record.write_to(&self.outdir).await?;
                    debug!(path = %path.display(), "record written");
                    summary.written += 1;
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!(error = %e, category = %e.category(), failed = summary.failed, "query failed");
                }
            }
        }

        if summary.failed > 0 {
            warn!(failed = summary.failed, written = summary.written, "benchmark finished with errors");
        } else {
            info!(written = summary.written, "benchmark finished");
        }
        Ok(summary)
    }
}

async fn run_one<A>(agent: &A, evaluator: &MultiEvaluator, item: &DatasetItem) -> Result<RunRecord>
where
    A: Agent + ?Sized,
{
    let started_at = Utc::now();
    let clock = Instant::now();

    let trace = agent.run(&item.query).await?;
    let answer = trace.last().map(|m| m.text().to_string()).unwrap_or_default();
    let grades: BTreeMap<_, _> = evaluator.grade(&item.query, &item.target, &answer).await?;

    Ok(RunRecord {
        mid: content_hash(&item.query),
        query: item.query.clone(),
        target: item.target.clone(),
        elapsed: clock.elapsed().as_secs_f64(),
        started_at,
        trace,
        grades,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_creates_nested_outdir() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = BenchConfig::builder()
            .output_root(dir.path())
            .dataset("frames")
            .agent_label("toolcall")
            .model_name("gemini/gemini-2.5-flash-preview-05-20")
            .build();
        let session = BenchSession::new(config).unwrap();

        assert!(session
            .outdir()
            .ends_with("frames/toolcall/gemini/gemini-2.5-flash-preview-05-20"));
        assert!(session.outdir().is_dir());
        assert_eq!(session.config().seed, 123);
        assert_eq!(session.config().concurrency, 8);
    }

    #[test]
    fn select_samples_when_configured() {
        let dir = tempfile::TempDir::new().unwrap();
        let items: Vec<DatasetItem> = (0..10).map(|i| DatasetItem::new(format!("q{i}"), "t")).collect();
        let all = BenchSession::new(
            BenchConfig::builder()
                .output_root(dir.path())
                .dataset("seal0")
                .agent_label("simple")
                .model_name("m")
                .build(),
        )
        .unwrap();
        assert_eq!(all.select(items.clone()).len(), 10);

        let sampled = BenchSession::new(
            BenchConfig::builder()
                .output_root(dir.path())
                .dataset("seal0")
                .agent_label("simple")
                .model_name("m")
                .sample(3)
                .build(),
        )
        .unwrap();
        assert_eq!(sampled.select(items.clone()), sample_items(&items, 3, 123));
    }

    #[test]
    fn retain_mids_selects_by_query_hash() {
        let dir = tempfile::TempDir::new().unwrap();
        let session = BenchSession::new(
            BenchConfig::builder()
                .output_root(dir.path())
                .dataset("frames")
                .agent_label("toolcall")
                .model_name("m")
                .build(),
        )
        .unwrap();
        let items: Vec<DatasetItem> = (0..5).map(|i| DatasetItem::new(format!("q{i}"), "t")).collect();

        assert_eq!(session.retain_mids(items.clone(), &[]), items);

        let picked = session.retain_mids(items.clone(), &[content_hash("q3"), content_hash("q1")]);
        let queries: Vec<&str> = picked.iter().map(|item| item.query.as_str()).collect();
        assert_eq!(queries, vec!["q1", "q3"]);

        assert!(session.retain_mids(items, &["deadbeef".to_string()]).is_empty());
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = BenchConfig::builder()
            .output_root(dir.path())
            .dataset("frames")
            .agent_label("a")
            .model_name("m")
            .concurrency(0)
            .build();
        assert!(matches!(BenchSession::new(config), Err(DeepSearchError::Configuration(_))));
    }
}
