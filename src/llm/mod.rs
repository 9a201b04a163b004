//! LLM integration for IntelliSQL.
//!
//! Provides the client trait, the hosted provider implementations and the
//! `Translator` that turns a question into a SQL string.

pub mod factory;
pub mod gemini;
pub mod mock;
pub mod openai;
pub mod prompt;
pub mod translator;
pub mod types;

pub use factory::{create_client, resolve_api_key};
pub use gemini::{GeminiClient, GeminiConfig};
pub use mock::{FailingLlmClient, MockLlmClient};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use prompt::{build_messages, schema_context};
pub use translator::Translator;
pub use types::{Message, Role};

use async_trait::async_trait;
use std::str::FromStr;

use crate::error::Result;

/// Trait for LLM clients that can generate completions.
///
/// Implementations must be thread-safe (Send + Sync) to support async operations.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given messages.
    ///
    /// Returns the model's text exactly as received. Failures are returned
    /// immediately; implementations never retry.
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// Google Gemini
    #[default]
    Gemini,
    /// OpenAI chat completions
    OpenAi,
    /// Mock client for testing (no API key required)
    Mock,
}

impl LlmProvider {
    /// Returns the provider as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Mock => "mock",
        }
    }

    /// Returns the model used when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => gemini::DEFAULT_MODEL,
            Self::OpenAi => openai::DEFAULT_MODEL,
            Self::Mock => "mock",
        }
    }

    /// Returns the provider-specific environment variable holding the API key.
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::OpenAi => Some("OPENAI_API_KEY"),
            Self::Mock => None,
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            "mock" => Ok(Self::Mock),
            _ => Err(format!(
                "Unknown LLM provider: {}. Expected: gemini, openai, or mock",
                s
            )),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
