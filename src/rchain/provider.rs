use std::env;

use reqwest::StatusCode;
use thiserror::Error;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Chat-completions endpoint under an OpenAI-compatible base URL.
pub fn endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

pub fn is_api_key_present() -> bool {
    env::var(API_KEY_ENV)
        .ok()
        .is_some_and(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub base_url: String,
    pub temperature: f32,
    pub timeout_secs: Option<u64>,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{key_env} is not set in the environment")]
    MissingApiKey { key_env: &'static str },
    #[error("chat request failed: {source}")]
    Request {
        #[from]
        source: reqwest::Error,
    },
    #[error("chat API error {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("chat response could not be decoded: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },
    #[error("chat response did not contain a message")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        assert_eq!(
            endpoint("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            endpoint("http://127.0.0.1:8080"),
            "http://127.0.0.1:8080/chat/completions"
        );
    }

    #[test]
    fn api_errors_render_status_and_body() {
        let err = ProviderError::Api {
            status: StatusCode::UNAUTHORIZED,
            body: "bad key".to_string(),
        };
        assert_eq!(err.to_string(), "chat API error 401 Unauthorized: bad key");
    }

    #[test]
    fn missing_key_names_the_variable() {
        let err = ProviderError::MissingApiKey {
            key_env: API_KEY_ENV,
        };
        assert_eq!(err.to_string(), "OPENAI_API_KEY is not set in the environment");
    }
}
