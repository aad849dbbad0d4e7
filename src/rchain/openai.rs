use std::env;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::rchain::ai::AIMessage;
use crate::rchain::chat_models::{ChatMessage, ChatModel};
use crate::rchain::provider::{API_KEY_ENV, ChatOptions, ProviderError, endpoint};
use crate::rchain::tools::{ToolCall, ToolDefinition};

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    #[serde(default)]
    id: String,
    function: WireFunction,
}

#[derive(Debug, Deserialize)]
struct WireFunction {
    name: String,
    arguments: Option<String>,
}

/// Blocking OpenAI chat-completions client.
#[derive(Debug, Clone)]
pub struct OpenAiChat {
    model: String,
    temperature: f32,
    api_key: String,
    url: String,
    client: Client,
    tools: Option<Vec<ToolDefinition>>,
}

impl OpenAiChat {
    /// Creates a client reading the key from `OPENAI_API_KEY`.
    pub fn from_env(model: impl Into<String>, options: &ChatOptions) -> Result<Self, ProviderError> {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or(ProviderError::MissingApiKey {
                key_env: API_KEY_ENV,
            })?;
        Self::new(model, api_key, options)
    }

    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        options: &ChatOptions,
    ) -> Result<Self, ProviderError> {
        // `None` disables the blocking client's built-in 30s limit.
        let client = Client::builder()
            .timeout(options.timeout_secs.map(Duration::from_secs))
            .build()?;
        Ok(Self {
            model: model.into(),
            temperature: options.temperature,
            api_key: api_key.into(),
            url: endpoint(&options.base_url),
            client,
            tools: None,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn payload(&self, messages: &[ChatMessage]) -> Value {
        let mut payload = Map::new();
        payload.insert("model".to_string(), Value::String(self.model.clone()));
        payload.insert(
            "messages".to_string(),
            Value::Array(messages.iter().map(|message| message.to_json()).collect()),
        );
        if let Some(tools) = &self.tools {
            payload.insert(
                "tools".to_string(),
                Value::Array(tools.iter().map(|tool| tool.to_json()).collect()),
            );
            payload.insert("tool_choice".to_string(), json!("auto"));
        }
        payload.insert("temperature".to_string(), json!(self.temperature));
        Value::Object(payload)
    }
}

impl ChatModel for OpenAiChat {
    fn bind_tools(&self, tools: Vec<ToolDefinition>) -> Self {
        let mut bound = self.clone();
        bound.tools = Some(tools);
        bound
    }

    fn invoke_messages(&self, messages: &[ChatMessage]) -> Result<AIMessage, ProviderError> {
        debug!(
            model = %self.model,
            messages = messages.len(),
            tools = self.tools.as_ref().map_or(0, Vec::len),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.payload(messages))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let body: ChatCompletionResponse = serde_json::from_str(&response.text()?)?;
        let message = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or(ProviderError::EmptyResponse)?;

        let tool_calls = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter(|call| !call.function.name.is_empty())
            .map(|call| ToolCall::from_raw(call.id, call.function.name, call.function.arguments.as_deref()))
            .collect::<Vec<_>>();
        debug!(tool_calls = tool_calls.len(), "chat completion received");

        Ok(AIMessage {
            content: message.content.unwrap_or_default(),
            tool_calls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rchain::tools::ToolFunction;
    use mockito::Matcher;
    use std::io::Write;
    use std::thread;

    fn options(base_url: String) -> ChatOptions {
        ChatOptions {
            base_url,
            ..ChatOptions::default()
        }
    }

    fn slow_server(delay: Duration) -> mockito::ServerGuard {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_chunked_body(move |body| {
                thread::sleep(delay);
                body.write_all(br#"{"choices":[{"message":{"role":"assistant","content":"Worth the wait."}}]}"#)
            })
            .create();
        server
    }

    fn demo_tool() -> ToolDefinition {
        ToolDefinition::from_function(ToolFunction::new("tool_demo", "Demo."))
    }

    #[test]
    fn plain_reply_is_returned_as_content() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "hi"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Hello!"}}]}"#)
            .create();

        let chat = OpenAiChat::new("gpt-4o-mini", "test-key", &options(server.url())).unwrap();
        let reply = chat.invoke_messages(&[ChatMessage::user_text("hi")]).unwrap();

        mock.assert();
        assert_eq!(reply, AIMessage::text("Hello!"));
    }

    #[test]
    fn bound_tools_are_offered_with_auto_choice() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(Matcher::PartialJson(json!({"tool_choice": "auto"})))
            .with_status(200)
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":null,"tool_calls":[
                    {"id":"call_9","type":"function","function":{"name":"tool_demo","arguments":"{\"x\":1}"}}
                ]}}]}"#,
            )
            .create();

        let chat = OpenAiChat::new("gpt-4o-mini", "test-key", &options(server.url()))
            .unwrap()
            .bind_tools(vec![demo_tool()]);
        let reply = chat.invoke_messages(&[ChatMessage::user_text("hi")]).unwrap();

        mock.assert();
        assert_eq!(reply.content, "");
        assert_eq!(
            reply.tool_calls,
            vec![ToolCall {
                id: "call_9".to_string(),
                name: "tool_demo".to_string(),
                args: json!({"x": 1}),
            }]
        );
    }

    #[test]
    fn bound_payload_lists_tool_schemas() {
        let chat = OpenAiChat::new("m", "k", &ChatOptions::default())
            .unwrap()
            .bind_tools(vec![demo_tool()]);
        let payload = chat.payload(&[ChatMessage::user_text("hi")]);
        assert_eq!(payload["tools"], json!([demo_tool().to_json()]));
        assert_eq!(payload["tool_choice"], json!("auto"));
    }

    #[test]
    fn unbound_payload_has_no_tools() {
        let chat = OpenAiChat::new("m", "k", &ChatOptions::default()).unwrap();
        let payload = chat.payload(&[ChatMessage::user_text("hi")]);
        assert!(payload.get("tools").is_none());
        assert!(payload.get("tool_choice").is_none());
        assert_eq!(payload["temperature"], json!(0.3_f32));
    }

    #[test]
    fn error_status_becomes_api_error() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("slow down")
            .create();

        let chat = OpenAiChat::new("m", "k", &options(server.url())).unwrap();
        let err = chat.invoke_messages(&[ChatMessage::user_text("hi")]).unwrap_err();
        match err {
            ProviderError::Api { status, body } => {
                assert_eq!(status.as_u16(), 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_choices_is_empty_response() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create();

        let chat = OpenAiChat::new("m", "k", &options(server.url())).unwrap();
        let err = chat.invoke_messages(&[ChatMessage::user_text("hi")]).unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }

    #[test]
    fn slow_replies_are_awaited_without_a_timeout() {
        let server = slow_server(Duration::from_secs(32));

        let chat = OpenAiChat::new("m", "k", &options(server.url())).unwrap();
        let reply = chat.invoke_messages(&[ChatMessage::user_text("hi")]).unwrap();

        assert_eq!(reply, AIMessage::text("Worth the wait."));
    }

    #[test]
    fn configured_timeout_abandons_the_request() {
        let server = slow_server(Duration::from_secs(3));
        let options = ChatOptions {
            timeout_secs: Some(1),
            ..options(server.url())
        };

        let chat = OpenAiChat::new("m", "k", &options).unwrap();
        let err = chat.invoke_messages(&[ChatMessage::user_text("hi")]).unwrap_err();

        assert!(matches!(err, ProviderError::Request { .. }), "unexpected error: {err}");
    }
}
