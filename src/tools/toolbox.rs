//! Tool registry: signature derivation and tool-call dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::arguments::ToolArguments;
use super::tool::Tool;
use super::types::ToolSignature;
use super::validation::validate_arguments;
use crate::error::{DeepSearchError, Result};
use crate::types::{Message, ToolCallRequest};

/// Bridges a set of native tools and the provider tool-calling protocol.
pub struct ToolBox {
    /// Registered name -> (tool, index of its advertised signature).
    tools: HashMap<String, (Arc<dyn Tool>, usize)>,
    signatures: Vec<ToolSignature>,
    /// Lowercased name -> registered name, present when signatures are case-folded.
    folded_names: Option<HashMap<String, String>>,
}

impl ToolBox {
    /// Register `tools` and derive one signature per tool, in registration order.
    ///
    /// With `force_lowercase`, every key and string value in the signatures
    /// is lowercased for providers that reject mixed-case schemas.
    pub fn new<I>(tools: I, force_lowercase: bool) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        let mut registry = HashMap::new();
        let mut signatures = Vec::new();

        for tool in tools {
            let name = tool.name().to_string();
            let signature = ToolSignature::from_tool(tool.as_ref())?;
            if registry.insert(name.clone(), (tool, signatures.len())).is_some() {
                return Err(DeepSearchError::Configuration(format!(
                    "Tool {name} registered twice"
                )));
            }
            signatures.push(if force_lowercase {
                signature.lowercased()
            } else {
                signature
            });
        }

        let folded_names = if force_lowercase {
            let mut folded = HashMap::with_capacity(registry.len());
            for name in registry.keys() {
                if let Some(other) = folded.insert(name.to_lowercase(), name.clone()) {
                    return Err(DeepSearchError::Configuration(format!(
                        "Tools {other} and {name} collide when lowercased"
                    )));
                }
            }
            Some(folded)
        } else {
            None
        };

        Ok(Self {
            tools: registry,
            signatures,
            folded_names,
        })
    }

    /// A toolbox with no tools.
    pub fn empty() -> Self {
        Self {
            tools: HashMap::new(),
            signatures: Vec::new(),
            folded_names: None,
        }
    }

    /// Provider-facing signatures, in registration order.
    pub fn signatures(&self) -> &[ToolSignature] {
        &self.signatures
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute one tool call and wrap its text result in a `tool` message.
    pub async fn run(&self, call: &ToolCallRequest) -> Result<Message> {
        if call.call_type != "function" {
            return Err(DeepSearchError::contract(format!(
                "Tool call {} has type '{}', expected 'function'",
                call.id, call.call_type
            )));
        }

        let (tool, index) = self.lookup(call.name())?;
        let args = ToolArguments::parse(&call.function.arguments)?;
        validate_arguments(args.raw(), self.signatures[*index].parameters()).map_err(|msg| {
            DeepSearchError::InvalidArgument(format!("{}: {msg}", call.name()))
        })?;

        debug!(tool = call.name(), call_id = %call.id, "dispatching tool call");
        let output = tool.execute(&args).await?;
        let text = output.into_text(call.name())?;

        Ok(Message::tool_result(call.name(), call.id.clone(), text))
    }

    fn lookup(&self, name: &str) -> Result<&(Arc<dyn Tool>, usize)> {
        if let Some(tool) = self.tools.get(name) {
            return Ok(tool);
        }
        self.folded_names
            .as_ref()
            .and_then(|folded| folded.get(name))
            .and_then(|registered| self.tools.get(registered))
            .ok_or_else(|| DeepSearchError::ToolNotFound(name.to_string()))
    }
}

impl std::fmt::Debug for ToolBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolBox")
            .field(
                "tools",
                &self.signatures.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("lowercase", &self.folded_names.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{AgentTool, ToolOutput, ToolParameters};
    use crate::types::Role;
    use serde_json::json;

    fn echo() -> Arc<dyn Tool> {
        Arc::new(AgentTool::new(
            "Echo",
            "Return the Input TEXT",
            ToolParameters::object().string("text", "Text to echo", true).build(),
            |args| async move { Ok(ToolOutput::text(args.get_str("text")?)) },
        ))
    }

    #[tokio::test]
    async fn run_returns_tool_message() {
        let toolbox = ToolBox::new([echo()], false).unwrap();
        let call = ToolCallRequest::function("call_1", "Echo", &json!({"text": "hi"}));

        let msg = toolbox.run(&call).await.unwrap();

        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.name.as_deref(), Some("Echo"));
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(msg.text(), "hi");
    }

    #[tokio::test]
    async fn non_function_call_type_is_rejected() {
        let toolbox = ToolBox::new([echo()], false).unwrap();
        let mut call = ToolCallRequest::function("call_1", "Echo", &json!({"text": "hi"}));
        call.call_type = "retrieval".into();

        let err = toolbox.run(&call).await.unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let toolbox = ToolBox::new([echo()], false).unwrap();
        let call = ToolCallRequest::function("call_1", "missing", &json!({}));

        let err = toolbox.run(&call).await.unwrap_err();
        assert!(matches!(err, DeepSearchError::ToolNotFound(name) if name == "missing"));
    }

    #[tokio::test]
    async fn schema_violations_fail_before_execution() {
        let toolbox = ToolBox::new([echo()], false).unwrap();
        let call = ToolCallRequest::function("call_1", "Echo", &json!({"text": 5}));

        let err = toolbox.run(&call).await.unwrap_err();
        assert!(matches!(err, DeepSearchError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn lowercased_names_still_dispatch() {
        let toolbox = ToolBox::new([echo()], true).unwrap();
        assert_eq!(toolbox.signatures()[0].name(), "echo");
        assert_eq!(toolbox.signatures()[0].description(), "return the input text");

        let call = ToolCallRequest::function("call_1", "echo", &json!({"text": "Hi"}));
        let msg = toolbox.run(&call).await.unwrap();
        assert_eq!(msg.text(), "Hi");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = ToolBox::new([echo(), echo()], false).unwrap_err();
        assert!(matches!(err, DeepSearchError::Configuration(_)));
    }

    #[test]
    fn case_folded_collisions_are_rejected() {
        let search = |name: &str| -> Arc<dyn Tool> {
            Arc::new(AgentTool::new(
                name,
                "search",
                ToolParameters::object().string("query", "Query", true).build(),
                |_| async { Ok(ToolOutput::text("")) },
            ))
        };

        assert!(ToolBox::new([search("Search"), search("search")], false).is_ok());
        let err = ToolBox::new([search("Search"), search("search")], true).unwrap_err();
        assert!(matches!(err, DeepSearchError::Configuration(ref m) if m.contains("collide")));
    }

    #[test]
    fn non_object_parameters_are_rejected() {
        let tool: Arc<dyn Tool> = Arc::new(AgentTool::new(
            "scalar",
            "takes a scalar",
            ToolParameters::from_schema(json!({"type": "string"})),
            |_| async { Ok(ToolOutput::text("")) },
        ));
        let err = ToolBox::new([tool], false).unwrap_err();
        assert!(err.is_contract_violation());
    }
}
