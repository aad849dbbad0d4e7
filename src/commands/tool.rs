use clap::Args;
use serde_json::Value;

use crate::registry::TheoryTool;

/// Runs one theory tool offline and prints its JSON result.
#[derive(Debug, Args, Clone)]
pub struct ToolArgs {
    /// Tool name: get-scale, identify-chord, transpose, roman-numerals-in-key
    /// (the `tool_*` wire names work too)
    pub tool: TheoryTool,
    /// JSON object with the tool arguments
    #[arg(long, default_value = "{}")]
    pub args: String,
}

pub fn run(args: ToolArgs) -> Result<(), String> {
    let raw: Value = serde_json::from_str(&args.args)
        .map_err(|err| format!("Invalid --args JSON: {err}"))?;
    let result = args.tool.run(raw)?;
    let pretty = serde_json::to_string_pretty(&result)
        .map_err(|err| format!("Failed to render result: {err}"))?;
    println!("{pretty}");
    Ok(())
}
