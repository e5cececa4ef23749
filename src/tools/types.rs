//! Tool-related types: parameter schemas and provider-facing signatures.

use serde::{Deserialize, Serialize};

use super::tool::Tool;
use crate::error::DeepSearchError;

/// JSON Schema-based parameter definition for a tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolParameters {
    /// JSON Schema object describing the parameters.
    pub schema: serde_json::Value,
}

impl ToolParameters {
    /// Create from a raw JSON Schema value.
    pub fn from_schema(schema: serde_json::Value) -> Self {
        Self { schema }
    }

    /// Create an empty parameter schema (no parameters).
    pub fn empty() -> Self {
        Self {
            schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": [],
            }),
        }
    }

    /// Builder: create an object schema with properties.
    pub fn object() -> ParameterBuilder {
        ParameterBuilder {
            properties: serde_json::Map::new(),
            required: Vec::new(),
        }
    }
}

/// Builder for constructing tool parameter schemas.
pub struct ParameterBuilder {
    properties: serde_json::Map<String, serde_json::Value>,
    required: Vec<String>,
}

impl ParameterBuilder {
    fn property(mut self, name: impl Into<String>, schema: serde_json::Value, required: bool) -> Self {
        let name = name.into();
        self.properties.insert(name.clone(), schema);
        if required {
            self.required.push(name);
        }
        self
    }

    /// Add a string property.
    pub fn string(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        let schema = serde_json::json!({ "type": "string", "description": description.into() });
        self.property(name, schema, required)
    }

    /// Add a number property.
    pub fn number(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        let schema = serde_json::json!({ "type": "number", "description": description.into() });
        self.property(name, schema, required)
    }

    /// Add a boolean property.
    pub fn boolean(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        let schema = serde_json::json!({ "type": "boolean", "description": description.into() });
        self.property(name, schema, required)
    }

    /// Add an array-of-strings property.
    pub fn string_array(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let schema = serde_json::json!({
            "type": "array",
            "description": description.into(),
            "items": { "type": "string" },
        });
        self.property(name, schema, required)
    }

    /// Add an enum (string) property.
    pub fn string_enum(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        values: &[&str],
        required: bool,
    ) -> Self {
        let schema = serde_json::json!({
            "type": "string",
            "description": description.into(),
            "enum": values,
        });
        self.property(name, schema, required)
    }

    /// Build into ToolParameters.
    pub fn build(self) -> ToolParameters {
        ToolParameters {
            schema: serde_json::json!({
                "type": "object",
                "properties": self.properties,
                "required": self.required,
            }),
        }
    }
}

/// Provider-facing description of a callable tool.
///
/// Immutable once built; serializes to the chat-completions
/// `{"type": "function", "function": {...}}` shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolSignature {
    #[serde(rename = "type")]
    kind: String,
    function: FunctionSignature,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct FunctionSignature {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

impl ToolSignature {
    /// Derive a signature from a tool's declared descriptor.
    ///
    /// The parameter schema must follow the object-parameter convention;
    /// its `type` is normalized to `"object"`.
    pub fn from_tool(tool: &dyn Tool) -> Result<Self, DeepSearchError> {
        let mut parameters = tool.parameters().schema.clone();
        let declared = parameters
            .get("type")
            .and_then(|t| t.as_str())
            .unwrap_or_default();
        if !declared.eq_ignore_ascii_case("object") {
            return Err(DeepSearchError::contract(format!(
                "Tool {} must declare object parameters, got type '{declared}'",
                tool.name()
            )));
        }
        if let Some(obj) = parameters.as_object_mut() {
            obj.insert("type".into(), "object".into());
        }
        Ok(Self {
            kind: "function".to_string(),
            function: FunctionSignature {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters,
            },
        })
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn description(&self) -> &str {
        &self.function.description
    }

    pub fn parameters(&self) -> &serde_json::Value {
        &self.function.parameters
    }

    /// Copy of this signature with every key and string leaf lowercased.
    pub fn lowercased(&self) -> Self {
        Self {
            kind: self.kind.to_lowercase(),
            function: FunctionSignature {
                name: self.function.name.to_lowercase(),
                description: self.function.description.to_lowercase(),
                parameters: recursive_lowercase(&self.function.parameters),
            },
        }
    }
}

/// Lowercase every object key and string leaf, preserving structure.
pub fn recursive_lowercase(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.to_lowercase(), recursive_lowercase(v)))
                .collect(),
        ),
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(recursive_lowercase).collect())
        }
        serde_json::Value::String(s) => serde_json::Value::String(s.to_lowercase()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recursive_lowercase_preserves_structure() {
        let value = json!({
            "Type": "OBJECT",
            "Properties": {"Query": {"type": "STRING", "enum": ["A", "b"]}},
            "Required": ["Query"],
            "MaxItems": 3,
            "Strict": true,
        });

        let lowered = recursive_lowercase(&value);

        assert_eq!(
            lowered,
            json!({
                "type": "object",
                "properties": {"query": {"type": "string", "enum": ["a", "b"]}},
                "required": ["query"],
                "maxitems": 3,
                "strict": true,
            })
        );
    }
}
