use serde_json::{Map, Value};

use crate::rchain::ai::AIMessage;
use crate::rchain::provider::ProviderError;
use crate::rchain::tools::{ToolCall, ToolDefinition};

/// A chat-completions backend.
pub trait ChatModel: Sized {
    /// Returns a copy of the model bound to tool definitions.
    fn bind_tools(&self, tools: Vec<ToolDefinition>) -> Self;

    /// Invokes the model with fully-typed role messages.
    fn invoke_messages(&self, messages: &[ChatMessage]) -> Result<AIMessage, ProviderError>;
}

/// Supported role values in chat requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// Instructions that frame the whole conversation.
    System,
    /// Human/user role.
    User,
    /// Assistant role.
    Assistant,
    /// Tool result role.
    Tool,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::Tool => "tool",
        }
    }
}

/// One entry of the conversation history.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    role: MessageRole,
    content: Option<String>,
    name: Option<String>,
    tool_call_id: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

impl ChatMessage {
    fn new(role: MessageRole, content: Option<String>) -> Self {
        Self {
            role,
            content,
            name: None,
            tool_call_id: None,
            tool_calls: None,
        }
    }

    /// Builds the system prompt message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, Some(content.into()))
    }

    /// Builds a plain-text user message.
    pub fn user_text(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, Some(content.into()))
    }

    /// Builds an assistant message from an [`AIMessage`].
    pub fn assistant_from_ai(message: &AIMessage) -> Self {
        let content = Some(message.content.clone()).filter(|content| !content.is_empty());
        let mut assistant = Self::new(MessageRole::Assistant, content);
        if !message.tool_calls.is_empty() {
            assistant.tool_calls = Some(message.tool_calls.clone());
        }
        assistant
    }

    /// Builds a tool-result message associated with a tool call id.
    pub fn tool_result(
        tool_call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let mut message = Self::new(MessageRole::Tool, Some(content.into()));
        message.tool_call_id = Some(tool_call_id.into());
        message.name = Some(name.into());
        message
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn tool_call_id(&self) -> Option<&str> {
        self.tool_call_id.as_deref()
    }

    pub fn tool_calls(&self) -> &[ToolCall] {
        self.tool_calls.as_deref().unwrap_or_default()
    }

    /// Serializes this chat message to provider JSON format.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "role".to_string(),
            Value::String(self.role.as_str().to_string()),
        );
        map.insert(
            "content".to_string(),
            self.content.clone().map(Value::String).unwrap_or(Value::Null),
        );
        if let Some(name) = &self.name {
            map.insert("name".to_string(), Value::String(name.clone()));
        }
        if let Some(tool_call_id) = &self.tool_call_id {
            map.insert(
                "tool_call_id".to_string(),
                Value::String(tool_call_id.clone()),
            );
        }
        if let Some(tool_calls) = &self.tool_calls {
            map.insert(
                "tool_calls".to_string(),
                Value::Array(tool_calls.iter().map(|call| call.to_json()).collect()),
            );
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn system_and_user_messages_serialize_plainly() {
        assert_eq!(
            ChatMessage::system("be brief").to_json(),
            json!({"role": "system", "content": "be brief"})
        );
        assert_eq!(
            ChatMessage::user_text("hi").to_json(),
            json!({"role": "user", "content": "hi"})
        );
    }

    #[test]
    fn tool_call_echo_has_null_content() {
        let call = ToolCall::from_raw("call_1", "tool_get_scale", Some(r#"{"tonic":"C"}"#));
        let message = ChatMessage::assistant_from_ai(&AIMessage::requesting_tools(vec![call]));

        assert_eq!(message.role(), MessageRole::Assistant);
        assert_eq!(message.content(), None);
        assert_eq!(message.tool_calls().len(), 1);
        assert_eq!(
            message.to_json(),
            json!({
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "tool_get_scale", "arguments": "{\"tonic\":\"C\"}"}
                }]
            })
        );
    }

    #[test]
    fn tool_results_carry_id_and_name() {
        let message = ChatMessage::tool_result("call_1", "tool_transpose", r#"{"to":"E"}"#);
        assert_eq!(
            message.to_json(),
            json!({
                "role": "tool",
                "content": "{\"to\":\"E\"}",
                "name": "tool_transpose",
                "tool_call_id": "call_1"
            })
        );
    }
}
