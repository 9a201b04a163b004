//! Google Gemini LLM client implementation.
//!
//! Implements the LlmClient trait against the Gemini `generateContent` REST
//! endpoint. One request per call: there is no retry loop and, unless a
//! timeout is configured, the call waits for the service to answer.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{IntelliSqlError, Result};
use crate::llm::types::{Message, Role};
use crate::llm::LlmClient;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini API base URL (the model path is appended per request).
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Request timeout in seconds; `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    /// Base URL of the models endpoint.
    pub base_url: String,
}

impl GeminiConfig {
    /// Creates a new config with the given API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            timeout_secs: None,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Points the client at a different models endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns the full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Gemini LLM client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    /// Creates a new Gemini client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| IntelliSqlError::llm(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Converts internal messages to Gemini `contents`.
    ///
    /// Gemini has no system role in `contents`, so system and user messages
    /// are folded into consecutive parts of a single user turn: the schema
    /// context first, then the question.
    fn convert_messages(messages: &[Message]) -> Vec<GeminiContent> {
        let mut contents: Vec<GeminiContent> = Vec::new();

        for message in messages {
            let role = match message.role {
                Role::Assistant => "model",
                Role::System | Role::User => "user",
            };
            let part = GeminiPart {
                text: message.content.clone(),
            };

            match contents.last_mut() {
                Some(last) if last.role.as_deref() == Some(role) => last.parts.push(part),
                _ => contents.push(GeminiContent {
                    role: Some(role.to_string()),
                    parts: vec![part],
                }),
            }
        }

        contents
    }

    /// Extracts the text of the first candidate.
    ///
    /// A candidate without any text counts as no response.
    fn extract_text(response: GenerateContentResponse) -> Result<String> {
        let block_reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .filter(|text| !text.trim().is_empty());

        match (text, block_reason) {
            (Some(text), _) => Ok(text),
            (None, Some(reason)) => Err(IntelliSqlError::llm(format!(
                "Gemini blocked the prompt: {}",
                reason
            ))),
            (None, None) => Err(IntelliSqlError::llm("No response from Gemini")),
        }
    }

    /// Parses an API error response.
    fn parse_error(status: reqwest::StatusCode, body: &str) -> IntelliSqlError {
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return IntelliSqlError::llm("Authentication failed. Check your GEMINI_API_KEY.");
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return IntelliSqlError::llm("Quota exceeded or rate limited. Please wait and try again.");
        }

        if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(body) {
            return IntelliSqlError::llm(format!(
                "Gemini API error: {}",
                error_response.error.message
            ));
        }

        IntelliSqlError::llm(format!("Gemini API error ({}): {}", status, body))
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let request = GenerateContentRequest {
            contents: Self::convert_messages(messages),
        };

        debug!(model = %self.config.model, "Gemini generateContent request");

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IntelliSqlError::llm("Request timed out. Try again.")
                } else if e.is_connect() {
                    IntelliSqlError::llm("Failed to connect to Gemini API. Check your network.")
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

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| IntelliSqlError::llm(format!("Failed to parse response: {}", e)))?;

        Self::extract_text(parsed)
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}
