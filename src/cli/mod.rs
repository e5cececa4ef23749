//! CLI entry point for deepsearch.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::bench::DatasetKind;
use crate::config::models::DEFAULT_MODEL;

/// Deep-research agent CLI
#[derive(Parser, Debug)]
#[command(name = "deepsearch", version, about = "Tool-calling research agent and benchmark runner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer one question
    Ask(AskArgs),
    /// Run an agent over a benchmark dataset
    Bench(BenchArgs),
}

/// Which agent answers the questions.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    /// Search and scrape tools in a loop
    Toolcall,
    /// One completion, no tools
    Simple,
    /// Hosted Jina DeepSearch, one call per question
    JinaDeepsearch,
}

impl AgentKind {
    /// Directory label used under the results root.
    pub fn label(self) -> &'static str {
        match self {
            Self::Toolcall => "toolcall",
            Self::Simple => "simple",
            Self::JinaDeepsearch => "jina-deepsearch",
        }
    }

    /// Default number of queries in flight.
    pub fn default_concurrency(self) -> usize {
        match self {
            Self::Toolcall => 8,
            Self::Simple | Self::JinaDeepsearch => 16,
        }
    }
}

/// Arguments for the `ask` subcommand.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question to answer
    #[arg(short, long)]
    pub query: String,

    /// Model name, looked up in the model catalog
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// TOML file with extra model configurations
    #[arg(long)]
    pub models: Option<PathBuf>,

    /// Agent to use
    #[arg(short, long, value_enum, default_value = "toolcall")]
    pub agent: AgentKind,

    /// Extra instructions appended to the system prompt
    #[arg(long)]
    pub instructions: Option<String>,

    /// Skip the double-check round
    #[arg(long)]
    pub no_double_check: bool,

    /// Maximum completion rounds
    #[arg(long, default_value_t = crate::agent::DEFAULT_MAX_ITERS)]
    pub max_iters: usize,

    /// Grade the answer with this evaluator (needs --target)
    #[arg(short, long, requires = "target")]
    pub evaluator: Option<String>,

    /// Reference answer for grading
    #[arg(short, long)]
    pub target: Option<String>,

    /// Do not read or write the disk cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the `bench` subcommand.
#[derive(Parser, Debug)]
pub struct BenchArgs {
    /// Dataset kind (frames, seal0, simpleqa)
    #[arg(short, long)]
    pub dataset: DatasetKind,

    /// JSONL file holding the dataset
    #[arg(long)]
    pub data: PathBuf,

    /// Agent to benchmark
    #[arg(short, long, value_enum, default_value = "toolcall")]
    pub agent: AgentKind,

    /// Model name, looked up in the model catalog
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// TOML file with extra model configurations
    #[arg(long)]
    pub models: Option<PathBuf>,

    /// Run only a seeded sample of this many questions
    #[arg(long)]
    pub sample: Option<usize>,

    /// Re-run only the questions with these record ids
    #[arg(long, num_args = 1..)]
    pub mid: Vec<String>,

    /// Sampling seed
    #[arg(long, default_value_t = 123)]
    pub seed: u64,

    /// Maximum questions in flight (default depends on the agent)
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Evaluators to grade with (default: all presets)
    #[arg(short, long, value_delimiter = ',')]
    pub evaluators: Vec<String>,

    /// Skip the double-check round
    #[arg(long)]
    pub no_double_check: bool,

    /// Maximum completion rounds per question
    #[arg(long, default_value_t = crate::agent::DEFAULT_MAX_ITERS)]
    pub max_iters: usize,

    /// Root directory for run records
    #[arg(short, long, default_value = "results")]
    pub output: PathBuf,

    /// Do not read or write the disk cache
    #[arg(long)]
    pub no_cache: bool,
}

impl BenchArgs {
    pub fn concurrency(&self) -> usize {
        self.concurrency
            .unwrap_or_else(|| self.agent.default_concurrency())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ask_with_defaults() {
        let cli = Cli::try_parse_from(["deepsearch", "ask", "-q", "Who wrote Dune?"]).unwrap();
        match cli.command {
            Commands::Ask(args) => {
                assert_eq!(args.query, "Who wrote Dune?");
                assert_eq!(args.model, DEFAULT_MODEL);
                assert_eq!(args.agent, AgentKind::Toolcall);
                assert_eq!(args.max_iters, 100);
                assert!(!args.no_double_check);
                assert!(args.evaluator.is_none());
                assert!(!args.no_cache);
            }
            other => panic!("expected Ask, got {other:?}"),
        }
    }

    #[test]
    fn parse_ask_with_grading() {
        let cli = Cli::try_parse_from([
            "deepsearch",
            "ask",
            "--query",
            "Capital of France?",
            "--evaluator",
            "seal0",
            "--target",
            "Paris",
            "--no-double-check",
            "--agent",
            "simple",
        ])
        .unwrap();
        match cli.command {
            Commands::Ask(args) => {
                assert_eq!(args.evaluator.as_deref(), Some("seal0"));
                assert_eq!(args.target.as_deref(), Some("Paris"));
                assert!(args.no_double_check);
                assert_eq!(args.agent, AgentKind::Simple);
            }
            other => panic!("expected Ask, got {other:?}"),
        }
    }

    #[test]
    fn evaluator_requires_target() {
        assert!(Cli::try_parse_from(["deepsearch", "ask", "-q", "x", "-e", "seal0"]).is_err());
    }

    #[test]
    fn parse_bench_with_defaults() {
        let cli = Cli::try_parse_from([
            "deepsearch",
            "bench",
            "--dataset",
            "seal0",
            "--data",
            "seal0.jsonl",
        ])
        .unwrap();
        match cli.command {
            Commands::Bench(args) => {
                assert_eq!(args.dataset, DatasetKind::Seal0);
                assert_eq!(args.seed, 123);
                assert_eq!(args.concurrency(), 8);
                assert!(args.evaluators.is_empty());
                assert_eq!(args.output, PathBuf::from("results"));
                assert!(args.sample.is_none());
                assert!(args.mid.is_empty());
            }
            other => panic!("expected Bench, got {other:?}"),
        }
    }

    #[test]
    fn parse_bench_with_all_options() {
        let cli = Cli::try_parse_from([
            "deepsearch",
            "bench",
            "-d",
            "frames",
            "--data",
            "frames.jsonl",
            "-a",
            "simple",
            "--sample",
            "25",
            "--seed",
            "7",
            "-e",
            "frames,ods",
            "-o",
            "out",
        ])
        .unwrap();
        match cli.command {
            Commands::Bench(args) => {
                assert_eq!(args.dataset, DatasetKind::Frames);
                assert_eq!(args.agent, AgentKind::Simple);
                assert_eq!(args.concurrency(), 16);
                assert_eq!(args.sample, Some(25));
                assert_eq!(args.seed, 7);
                assert_eq!(args.evaluators, vec!["frames", "ods"]);
                assert_eq!(args.output, PathBuf::from("out"));
            }
            other => panic!("expected Bench, got {other:?}"),
        }
    }

    #[test]
    fn parse_bench_jina_with_record_ids() {
        let cli = Cli::try_parse_from([
            "deepsearch",
            "bench",
            "-d",
            "simpleqa",
            "--data",
            "simpleqa.jsonl",
            "--agent",
            "jina-deepsearch",
            "--mid",
            "abc123",
            "def456",
        ])
        .unwrap();
        match cli.command {
            Commands::Bench(args) => {
                assert_eq!(args.agent, AgentKind::JinaDeepsearch);
                assert_eq!(args.agent.label(), "jina-deepsearch");
                assert_eq!(args.concurrency(), 16);
                assert_eq!(args.mid, vec!["abc123", "def456"]);
            }
            other => panic!("expected Bench, got {other:?}"),
        }
    }

    #[test]
    fn unknown_dataset_is_error() {
        assert!(Cli::try_parse_from(["deepsearch", "bench", "-d", "mmlu", "--data", "x"]).is_err());
    }

    #[test]
    fn parse_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["deepsearch"]).is_err());
    }
}
