use crate::rchain::tools::ToolCall;

/// Assistant message returned by chat models.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AIMessage {
    /// Natural language content; empty when the model only requested tools.
    pub content: String,
    /// Optional tool call requests emitted by the model.
    pub tool_calls: Vec<ToolCall>,
}

impl AIMessage {
    /// Plain text reply without tool calls.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Reply that only requests tool calls.
    pub fn requesting_tools(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: String::new(),
            tool_calls,
        }
    }
}
