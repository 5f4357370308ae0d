//! Anthropic Messages API over sync HTTP.
//!
//! Uses ureq, so calls block the thread; run them under `spawn_blocking`
//! when an async runtime is driving.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing API key: {env_var} is not set (get one at https://console.anthropic.com/settings/keys)")]
    MissingApiKey { env_var: String },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse API response: {0}")]
    Parse(String),
}

/// Client for one model. Cheap to clone; the agent shares its pool.
#[derive(Clone)]
pub struct ModelClient {
    model: String,
    api_key: String,
    agent: ureq::Agent,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(120)))
        .build()
        .new_agent()
}

impl ModelClient {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            agent: make_agent(),
        }
    }

    pub fn from_env(model: impl Into<String>) -> Result<Self, ApiError> {
        let api_key = env::var(API_KEY_ENV).map_err(|_| ApiError::MissingApiKey {
            env_var: API_KEY_ENV.to_string(),
        })?;
        Ok(Self::new(model, api_key))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One single-turn completion; returns the first text block of the
    /// reply.
    pub fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ApiError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            system: None,
            temperature: None,
        };

        let response = self
            .agent
            .post(API_URL)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .send_json(&body)
            .map_err(|err| ApiError::Api {
                status: 0,
                message: err.to_string(),
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.into_body().read_to_string().unwrap_or_default();
            return Err(ApiError::Api { status, message });
        }

        let reply: MessagesResponse = response
            .into_body()
            .read_json()
            .map_err(|err| ApiError::Parse(err.to_string()))?;
        reply
            .content
            .into_iter()
            .find(|block| block.content_type == "text")
            .map(|block| block.text)
            .ok_or_else(|| ApiError::Parse("no text content in response".to_string()))
    }
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_body_omits_unset_optionals() {
        let body = MessagesRequest {
            model: "claude-3-5-sonnet-20241022",
            max_tokens: 2000,
            messages: vec![Message {
                role: "user",
                content: "hello",
            }],
            system: None,
            temperature: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "claude-3-5-sonnet-20241022");
        assert_eq!(json["max_tokens"], 2000);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        assert!(json.get("system").is_none());
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn reply_text_is_the_first_text_block() {
        let raw = r#"{"content":[{"type":"text","text":"report body"}],"model":"m"}"#;
        let reply: MessagesResponse = serde_json::from_str(raw).unwrap();
        let text = reply
            .content
            .into_iter()
            .find(|block| block.content_type == "text")
            .map(|block| block.text);
        assert_eq!(text.as_deref(), Some("report body"));
    }

    #[test]
    fn missing_key_error_names_the_variable() {
        let err = ApiError::MissingApiKey {
            env_var: API_KEY_ENV.to_string(),
        };
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }
}
