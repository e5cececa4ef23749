//! Tool system for function calling.

pub mod arguments;
pub mod cached;
pub mod output;
pub mod tool;
pub mod toolbox;
pub mod types;
pub mod validation;

#[cfg(feature = "web")]
pub mod web;

pub use arguments::ToolArguments;
pub use cached::CachedTool;
pub use output::{ToText, ToolOutput};
pub use tool::{AgentTool, Tool};
pub use toolbox::ToolBox;
pub use types::{recursive_lowercase, ParameterBuilder, ToolParameters, ToolSignature};
pub use validation::validate_arguments;
