//! The closed set of theory tools offered to the model.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::rchain::tools::{ToolCall, ToolDefinition, ToolFunction, ToolParam, ToolParamType};
use crate::theory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TheoryTool {
    GetScale,
    IdentifyChord,
    Transpose,
    RomanNumeralsInKey,
}

#[derive(Debug, Deserialize)]
struct GetScaleArgs {
    tonic: String,
    scale_type: String,
}

#[derive(Debug, Deserialize)]
struct IdentifyChordArgs {
    note_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TransposeArgs {
    note_name: String,
    interval_name: String,
}

#[derive(Debug, Deserialize)]
struct RomanNumeralsArgs {
    tonic: String,
    #[serde(default = "default_scale_type")]
    scale_type: String,
}

fn default_scale_type() -> String {
    "major".to_string()
}

impl TheoryTool {
    pub const ALL: [TheoryTool; 4] = [
        TheoryTool::GetScale,
        TheoryTool::IdentifyChord,
        TheoryTool::Transpose,
        TheoryTool::RomanNumeralsInKey,
    ];

    /// Function name advertised to the model.
    pub fn name(self) -> &'static str {
        match self {
            TheoryTool::GetScale => "tool_get_scale",
            TheoryTool::IdentifyChord => "tool_identify_chord",
            TheoryTool::Transpose => "tool_transpose",
            TheoryTool::RomanNumeralsInKey => "tool_roman_numerals_in_key",
        }
    }

    pub fn definition(self) -> ToolDefinition {
        let string = |name: &str, required: bool, description: &str| {
            ToolParam::new(name, ToolParamType::String, required, description)
        };
        let function = match self {
            TheoryTool::GetScale => {
                ToolFunction::new(self.name(), "Return the scale notes for a given tonic and scale type.")
                    .with_param(string("tonic", true, "Tonic note, e.g. C, F#, Bb."))
                    .with_param(string(
                        "scale_type",
                        true,
                        "Scale or mode, e.g. major, natural_minor, dorian, blues.",
                    ))
            }
            TheoryTool::IdentifyChord => {
                ToolFunction::new(self.name(), "Identify chord names from a set of note names.")
                    .with_param(
                        ToolParam::new(
                            "note_names",
                            ToolParamType::Array,
                            true,
                            "Note names in any order, e.g. [\"C\", \"E\", \"G\"].",
                        )
                        .with_items(ToolParamType::String),
                    )
            }
            TheoryTool::Transpose => {
                ToolFunction::new(self.name(), "Transpose a note by a given interval.")
                    .with_param(string("note_name", true, "Starting note, e.g. C or Eb."))
                    .with_param(string(
                        "interval_name",
                        true,
                        "Interval upward, e.g. major third, P5, b7.",
                    ))
            }
            TheoryTool::RomanNumeralsInKey => {
                ToolFunction::new(self.name(), "Diatonic triads and roman numerals for the key.")
                    .with_param(string("tonic", true, "Key tonic, e.g. G."))
                    .with_param(
                        string("scale_type", false, "Seven-note scale or mode of the key.")
                            .with_default(json!("major")),
                    )
            }
        };
        ToolDefinition::from_function(function)
    }

    /// Schema list sent with every tool-enabled request.
    pub fn definitions() -> Vec<ToolDefinition> {
        Self::ALL.iter().map(|tool| tool.definition()).collect()
    }

    /// Runs the tool against JSON arguments.
    ///
    /// `null` arguments are treated as an empty object.
    pub fn run(self, args: Value) -> Result<Value, String> {
        let args = match args {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        match self {
            TheoryTool::GetScale => {
                let args: GetScaleArgs = self.parse_args(args)?;
                encode(theory::get_scale(&args.tonic, &args.scale_type))
            }
            TheoryTool::IdentifyChord => {
                let args: IdentifyChordArgs = self.parse_args(args)?;
                encode(theory::identify_chord(&args.note_names))
            }
            TheoryTool::Transpose => {
                let args: TransposeArgs = self.parse_args(args)?;
                encode(theory::transpose(&args.note_name, &args.interval_name))
            }
            TheoryTool::RomanNumeralsInKey => {
                let args: RomanNumeralsArgs = self.parse_args(args)?;
                encode(theory::roman_numerals_in_key(&args.tonic, &args.scale_type))
            }
        }
    }

    fn parse_args<T: DeserializeOwned>(self, args: Value) -> Result<T, String> {
        serde_json::from_value(args).map_err(|err| format!("Invalid arguments for {}: {err}", self.name()))
    }
}

fn encode<T: Serialize>(result: Result<T, theory::TheoryError>) -> Result<Value, String> {
    let value = result.map_err(|err| err.to_string())?;
    serde_json::to_value(value).map_err(|err| err.to_string())
}

impl fmt::Display for TheoryTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TheoryTool {
    type Err = String;

    /// Accepts the wire name (`tool_get_scale`) or the short form (`get-scale`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        let wanted = wanted.strip_prefix("tool_").unwrap_or(&wanted);
        Self::ALL
            .into_iter()
            .find(|tool| tool.name().strip_prefix("tool_") == Some(wanted))
            .ok_or_else(|| {
                let known = Self::ALL.iter().map(|tool| tool.name()).collect::<Vec<_>>();
                format!("Unknown tool '{s}'. Available: {}", known.join(", "))
            })
    }
}

/// Executes one model-requested call; every failure becomes `{"error": ...}`.
pub fn dispatch(call: &ToolCall) -> Value {
    debug!(tool = %call.name, id = %call.id, "dispatching tool call");
    let outcome = call
        .name
        .parse::<TheoryTool>()
        .and_then(|tool| tool.run(call.args.clone()));
    match outcome {
        Ok(value) => value,
        Err(message) => {
            debug!(tool = %call.name, id = %call.id, error = %message, "tool call failed");
            json!({ "error": message })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: Value) -> ToolCall {
        ToolCall {
            id: "call_1".to_string(),
            name: name.to_string(),
            args,
        }
    }

    #[test]
    fn every_tool_is_advertised_once() {
        let names = TheoryTool::definitions()
            .into_iter()
            .map(|tool| tool.function.name)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "tool_get_scale",
                "tool_identify_chord",
                "tool_transpose",
                "tool_roman_numerals_in_key"
            ]
        );
    }

    #[test]
    fn roman_numeral_schema_defaults_to_major() {
        let schema = TheoryTool::RomanNumeralsInKey.definition().to_json();
        let parameters = &schema["function"]["parameters"];
        assert_eq!(parameters["required"], json!(["tonic"]));
        assert_eq!(parameters["properties"]["scale_type"]["default"], json!("major"));
    }

    #[test]
    fn every_parameter_is_described() {
        for tool in TheoryTool::definitions() {
            let schema = tool.to_json();
            let properties = schema["function"]["parameters"]["properties"]
                .as_object()
                .unwrap()
                .clone();
            assert!(!properties.is_empty());
            for (name, property) in properties {
                let description = property["description"].as_str().unwrap_or_default();
                assert!(!description.is_empty(), "{} lacks a description for {name}", tool.function.name);
            }
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for tool in TheoryTool::ALL {
            assert_eq!(tool.name().parse::<TheoryTool>(), Ok(tool));
        }
        assert_eq!("get-scale".parse::<TheoryTool>(), Ok(TheoryTool::GetScale));
        assert_eq!(
            "roman_numerals_in_key".parse::<TheoryTool>(),
            Ok(TheoryTool::RomanNumeralsInKey)
        );
    }

    #[test]
    fn dispatch_matches_direct_calls() {
        let result = dispatch(&call(
            "tool_get_scale",
            json!({"tonic": "D", "scale_type": "dorian"}),
        ));
        let direct = theory::get_scale("D", "dorian").unwrap();
        assert_eq!(result, serde_json::to_value(direct).unwrap());
    }

    #[test]
    fn transpose_uses_from_by_to_keys() {
        let result = dispatch(&call(
            "tool_transpose",
            json!({"note_name": "C", "interval_name": "major third"}),
        ));
        assert_eq!(result, json!({"from": "C", "by": "major third", "to": "E"}));
    }

    #[test]
    fn roman_numerals_default_scale_type() {
        let result = dispatch(&call("tool_roman_numerals_in_key", json!({"tonic": "C"})));
        assert_eq!(result["key"], json!("C major"));
        assert_eq!(result["triads"][0]["roman"], json!("I"));
        assert_eq!(result["triads"][0]["notes"], json!(["C", "E", "G"]));
    }

    #[test]
    fn theory_errors_become_error_records() {
        let result = dispatch(&call(
            "tool_get_scale",
            json!({"tonic": "C", "scale_type": "blorp"}),
        ));
        let message = result["error"].as_str().unwrap();
        assert!(message.contains("Unsupported scale_type 'blorp'"));
    }

    #[test]
    fn missing_arguments_become_error_records() {
        let result = dispatch(&call("tool_transpose", json!({})));
        let message = result["error"].as_str().unwrap();
        assert!(message.starts_with("Invalid arguments for tool_transpose"));
        assert!(message.contains("note_name"));
    }

    #[test]
    fn unknown_tools_become_error_records() {
        let result = dispatch(&call("tool_play_kazoo", json!({})));
        assert!(result["error"].as_str().unwrap().contains("Unknown tool 'tool_play_kazoo'"));
    }

    #[test]
    fn null_arguments_are_an_empty_object() {
        let result = TheoryTool::IdentifyChord.run(Value::Null).unwrap_err();
        assert!(result.contains("note_names"));
    }
}
