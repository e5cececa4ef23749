//! deepsearch: a harness for tool-calling research agents.
//!
//! A [`ToolCallAgent`](agent::ToolCallAgent) answers a question by looping
//! over an OpenAI-compatible chat completion endpoint, running the web
//! search and scrape tools the model asks for until it gives a final
//! answer. The [`bench`] module runs an agent over a dataset concurrently
//! and grades each answer with one or more [`eval`] presets.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use deepsearch::prelude::*;
//! use deepsearch::tools::web::web_tools;
//!
//! # async fn example() -> deepsearch::error::Result<()> {
//! let config = Config::from_env();
//! let client = Arc::new(OpenAiChatClient::from_config(&config)?);
//! let agent = ToolCallAgent::new(client, ModelConfig::new("gpt-4.1"), web_tools(&config, None)?)?
//!     .with_double_check(true);
//! let trace = agent.run("Who wrote Dune?").await?;
//! println!("{}", trace.last().map(Message::text).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod bench;
pub mod cache;
pub mod config;
pub mod error;
pub mod eval;
pub mod prelude;
pub mod provider;
pub mod tools;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
