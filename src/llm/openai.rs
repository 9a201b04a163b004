//! OpenAI LLM client implementation.
//!
//! Implements the LlmClient trait for OpenAI's chat completions API. A single
//! request is made per call; errors are surfaced as-is.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{IntelliSqlError, Result};
use crate::llm::types::Message;
use crate::llm::LlmClient;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// OpenAI API URL.
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI client configuration.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Model to use (e.g., "gpt-4o").
    pub model: String,
    /// Request timeout in seconds; `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl OpenAiConfig {
    /// Creates a new config with the given API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            timeout_secs: None,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

/// OpenAI LLM client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiClient {
    /// Creates a new OpenAI client with the given configuration.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| IntelliSqlError::llm(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Converts internal messages to OpenAI API format.
    fn convert_messages(messages: &[Message]) -> Vec<OpenAiMessage> {
        messages
            .iter()
            .map(|m| OpenAiMessage {
                role: m.role.as_str().to_string(),
                content: m.content.clone(),
            })
            .collect()
    }

    /// Parses an API error response.
    fn parse_error(status: reqwest::StatusCode, body: &str) -> IntelliSqlError {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return IntelliSqlError::llm("Authentication failed. Check your OPENAI_API_KEY.");
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return IntelliSqlError::llm("Rate limited. Please wait and try again.");
        }

        if let Ok(error_response) = serde_json::from_str::<OpenAiErrorResponse>(body) {
            return IntelliSqlError::llm(format!(
                "OpenAI API error: {}",
                error_response.error.message
            ));
        }

        IntelliSqlError::llm(format!("OpenAI API error ({}): {}", status, body))
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let request = OpenAiRequest {
            model: self.config.model.clone(),
            messages: Self::convert_messages(messages),
        };

        debug!(model = %self.config.model, "OpenAI chat completion request");

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IntelliSqlError::llm("Request timed out. Try again.")
                } else if e.is_connect() {
                    IntelliSqlError::llm("Failed to connect to OpenAI API. Check your network.")
                } else {
                    IntelliSqlError::llm(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| IntelliSqlError::llm(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Self::parse_error(status, &body));
        }

        let response: OpenAiResponse = serde_json::from_str(&body)
            .map_err(|e| IntelliSqlError::llm(format!("Failed to parse response: {}", e)))?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| IntelliSqlError::llm("No response from OpenAI"))
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiError,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    message: String,
}
