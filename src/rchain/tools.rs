use serde_json::{Map, Value, json};

/// JSON schema primitive types supported for tool parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolParamType {
    String,
    Array,
}

impl ToolParamType {
    fn as_str(&self) -> &'static str {
        match self {
            ToolParamType::String => "string",
            ToolParamType::Array => "array",
        }
    }
}

/// One function parameter definition.
#[derive(Debug, Clone)]
pub struct ToolParam {
    /// Parameter name.
    pub name: String,
    /// Human-readable description shown to the model.
    pub description: String,
    /// JSON schema type.
    pub kind: ToolParamType,
    /// Element type when `kind` is an array.
    pub items: Option<ToolParamType>,
    /// Value the tool assumes when the parameter is omitted.
    pub default: Option<Value>,
    /// Whether the parameter is required.
    pub required: bool,
}

impl ToolParam {
    /// Builds a parameter definition.
    pub fn new(
        name: impl Into<String>,
        kind: ToolParamType,
        required: bool,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            items: None,
            default: None,
            required,
        }
    }

    /// Declares the element type of an array parameter.
    pub fn with_items(mut self, items: ToolParamType) -> Self {
        self.items = Some(items);
        self
    }

    /// Declares the default value advertised to the model.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Callable tool function definition.
#[derive(Debug, Clone)]
pub struct ToolFunction {
    /// Function name.
    pub name: String,
    /// Function description.
    pub description: String,
    /// Parameter definitions.
    pub params: Vec<ToolParam>,
}

impl ToolFunction {
    /// Creates a function definition.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Appends one parameter definition.
    pub fn with_param(mut self, param: ToolParam) -> Self {
        self.params.push(param);
        self
    }

    fn to_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &self.params {
            let mut param_def = Map::new();
            param_def.insert(
                "type".to_string(),
                Value::String(param.kind.as_str().to_string()),
            );
            if let Some(items) = param.items {
                param_def.insert("items".to_string(), json!({ "type": items.as_str() }));
            }
            if let Some(default) = &param.default {
                param_def.insert("default".to_string(), default.clone());
            }
            param_def.insert(
                "description".to_string(),
                Value::String(param.description.clone()),
            );
            properties.insert(param.name.clone(), Value::Object(param_def));
            if param.required {
                required.push(Value::String(param.name.clone()));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("object".to_string()));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        Value::Object(schema)
    }
}

/// Tool wrapper matching chat-completions function-calling schema.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Function declaration.
    pub function: ToolFunction,
}

impl ToolDefinition {
    /// Wraps a function definition as a tool.
    pub fn from_function(function: ToolFunction) -> Self {
        Self { function }
    }

    /// Serializes the tool declaration to JSON.
    pub fn to_json(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.function.name,
                "description": self.function.description,
                "parameters": self.function.to_schema(),
            }
        })
    }
}

/// Tool call emitted by a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Provider-generated call id.
    pub id: String,
    /// Tool/function name.
    pub name: String,
    /// Arguments payload.
    pub args: Value,
}

impl ToolCall {
    /// Builds a call from the raw argument string sent by the provider.
    ///
    /// Missing or blank arguments become an empty object; text that is not
    /// JSON is kept as a string so the tool can report it.
    pub fn from_raw(id: impl Into<String>, name: impl Into<String>, raw_args: Option<&str>) -> Self {
        let args = match raw_args.map(str::trim) {
            None | Some("") => Value::Object(Map::new()),
            Some(raw) => serde_json::from_str(raw).unwrap_or(Value::String(raw.to_string())),
        };
        Self {
            id: id.into(),
            name: name.into(),
            args,
        }
    }

    fn args_as_string(&self) -> String {
        match &self.args {
            Value::String(value) => value.clone(),
            other => serde_json::to_string(other).unwrap_or_else(|_| "{}".to_string()),
        }
    }

    /// Serializes a tool call payload to provider JSON format.
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "type": "function",
            "function": {
                "name": self.name,
                "arguments": self.args_as_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_lists_required_params_items_and_defaults() {
        let tool = ToolDefinition::from_function(
            ToolFunction::new("tool_demo", "Demo tool.")
                .with_param(
                    ToolParam::new("notes", ToolParamType::Array, true, "Notes to inspect.")
                        .with_items(ToolParamType::String),
                )
                .with_param(
                    ToolParam::new("mode", ToolParamType::String, false, "Mode name.")
                        .with_default(json!("major")),
                ),
        );

        assert_eq!(
            tool.to_json(),
            json!({
                "type": "function",
                "function": {
                    "name": "tool_demo",
                    "description": "Demo tool.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "notes": {
                                "type": "array",
                                "items": {"type": "string"},
                                "description": "Notes to inspect."
                            },
                            "mode": {
                                "type": "string",
                                "default": "major",
                                "description": "Mode name."
                            }
                        },
                        "required": ["notes"]
                    }
                }
            })
        );
    }

    #[test]
    fn raw_arguments_are_parsed_or_defaulted() {
        let parsed = ToolCall::from_raw("call_1", "tool_demo", Some(r#"{"tonic":"D"}"#));
        assert_eq!(parsed.args, json!({"tonic": "D"}));

        let empty = ToolCall::from_raw("call_2", "tool_demo", Some("  "));
        assert_eq!(empty.args, json!({}));

        let missing = ToolCall::from_raw("call_3", "tool_demo", None);
        assert_eq!(missing.args, json!({}));

        let broken = ToolCall::from_raw("call_4", "tool_demo", Some("{oops"));
        assert_eq!(broken.args, json!("{oops"));
    }

    #[test]
    fn call_json_keeps_arguments_as_string() {
        let call = ToolCall::from_raw("call_1", "tool_demo", Some(r#"{"a":1}"#));
        assert_eq!(
            call.to_json(),
            json!({
                "id": "call_1",
                "type": "function",
                "function": {"name": "tool_demo", "arguments": "{\"a\":1}"}
            })
        );
    }
}
