//! CLI command handlers for `ask` and `bench`.

use std::sync::Arc;

use tracing::info;

use super::{AgentKind, AskArgs, BenchArgs};
use crate::agent::{Agent, JinaDeepsearchAgent, SimpleAgent, ToolCallAgent};
use crate::bench::dataset::WIKIPEDIA_PREFERRED;
use crate::bench::{load_dataset, BenchConfig, BenchSession};
use crate::cache::{CacheStore, DiskCache};
use crate::config::{Config, ModelCatalog};
use crate::error::{DeepSearchError, Result};
use crate::eval::{preset, Evaluator, MultiEvaluator, PRESET_NAMES};
use crate::provider::{CachedCompletionClient, CompletionClient, OpenAiChatClient};
use crate::tools::web::web_tools;
use crate::types::ModelConfig;

/// Shared collaborators for one CLI invocation.
struct Wiring {
    config: Config,
    client: Arc<dyn CompletionClient>,
    cache: Option<Arc<dyn CacheStore>>,
}

impl Wiring {
    fn from_env(no_cache: bool) -> Result<Self> {
        let config = Config::from_env();
        let cache: Option<Arc<dyn CacheStore>> = if no_cache {
            None
        } else {
            Some(Arc::new(DiskCache::new(config.cache_dir())))
        };

        let chat = OpenAiChatClient::from_config(&config)?;
        let client: Arc<dyn CompletionClient> = match &cache {
            Some(store) => Arc::new(CachedCompletionClient::new(chat, store.clone())),
            None => Arc::new(chat),
        };
        Ok(Self { config, client, cache })
    }

    fn agent(
        &self,
        kind: AgentKind,
        model_config: ModelConfig,
        instructions: &str,
        double_check: bool,
        max_iters: usize,
        verbose: bool,
    ) -> Result<Arc<dyn Agent>> {
        match kind {
            AgentKind::Toolcall => {
                let tools = web_tools(&self.config, self.cache.clone())?;
                let agent = ToolCallAgent::new(self.client.clone(), model_config, tools)?
                    .with_special_instructions(instructions)
                    .with_double_check(double_check)
                    .with_max_iters(max_iters)
                    .with_verbose(verbose);
                Ok(Arc::new(agent))
            }
            AgentKind::Simple => Ok(Arc::new(SimpleAgent::new(self.client.clone(), model_config))),
            AgentKind::JinaDeepsearch => {
                let agent = JinaDeepsearchAgent::from_config(&self.config)?;
                Ok(Arc::new(match &self.cache {
                    Some(store) => agent.with_cache(store.clone()),
                    None => agent,
                }))
            }
        }
    }

    fn evaluators(&self, names: &[String]) -> Result<MultiEvaluator> {
        let names: Vec<&str> = if names.is_empty() {
            PRESET_NAMES.to_vec()
        } else {
            names.iter().map(String::as_str).collect()
        };
        let evaluators = names
            .into_iter()
            .map(|name| preset(name, self.client.clone(), self.cache.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(MultiEvaluator::new(evaluators))
    }
}

fn load_catalog(path: Option<&std::path::Path>) -> Result<ModelCatalog> {
    match path {
        Some(path) => ModelCatalog::load(path),
        None => Ok(ModelCatalog::default()),
    }
}

/// Handle `deepsearch ask`.
pub async fn handle_ask(args: AskArgs) -> Result<()> {
    let catalog = load_catalog(args.models.as_deref())?;
    let model_config = catalog.get(&args.model)?;
    let wiring = Wiring::from_env(args.no_cache)?;

    let instructions = args.instructions.as_deref().unwrap_or(WIKIPEDIA_PREFERRED);
    let agent = wiring.agent(
        args.agent,
        model_config,
        instructions,
        !args.no_double_check,
        args.max_iters,
        true,
    )?;

    let trace = agent.run(&args.query).await?;
    let answer = trace.last().map(|m| m.text().to_string()).unwrap_or_default();
    println!("{answer}");

    if let (Some(name), Some(target)) = (args.evaluator.as_deref(), args.target.as_deref()) {
        let evaluator = preset(name, wiring.client.clone(), wiring.cache.clone())?;
        let grade = evaluator.grade(&args.query, target, &answer).await?;
        println!("{}", serde_json::to_string_pretty(&grade)?);
    }
    Ok(())
}

/// Handle `deepsearch bench`.
pub async fn handle_bench(args: BenchArgs) -> Result<()> {
    let catalog = load_catalog(args.models.as_deref())?;
    let model_config = catalog.get(&args.model)?;
    let wiring = Wiring::from_env(args.no_cache)?;

    let agent = wiring.agent(
        args.agent,
        model_config,
        args.dataset.special_instructions(),
        !args.no_double_check,
        args.max_iters,
        false,
    )?;
    let evaluator = wiring.evaluators(&args.evaluators)?;

    let config = BenchConfig::builder()
        .output_root(args.output.clone())
        .dataset(args.dataset.to_string())
        .agent_label(args.agent.label())
        .model_name(args.model.clone())
        .seed(args.seed)
        .maybe_sample(args.sample)
        .concurrency(args.concurrency())
        .build();
    let session = BenchSession::new(config)?;

    let items = session.select(load_dataset(args.dataset, &args.data)?);
    let items = session.retain_mids(items, &args.mid);
    let summary = session.run(agent.as_ref(), &evaluator, &items).await?;

    info!(summary = %evaluator.summary(), "final scores");
    println!(
        "{} written, {} failed -> {}",
        summary.written,
        summary.failed,
        session.outdir().display()
    );
    if summary.written == 0 && summary.failed > 0 {
        return Err(DeepSearchError::InvalidResponse(format!(
            "all {} queries failed",
            summary.failed
        )));
    }
    Ok(())
}
