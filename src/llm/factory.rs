//! LLM client factory.
//!
//! Centralizes provider-specific logic for creating LLM clients. The API key
//! is resolved once here and injected into the client; clients never read
//! the environment themselves.

use crate::config::LlmConfig;
use crate::error::{IntelliSqlError, Result};
use crate::llm::{
    GeminiClient, GeminiConfig, LlmClient, LlmProvider, MockLlmClient, OpenAiClient, OpenAiConfig,
};

/// Generic API key variable, checked after the provider-specific one.
pub const GENERIC_API_KEY_ENV: &str = "API_KEY";

/// Resolves the API key for `provider`.
///
/// Order: the explicit `api_key`, the provider variable (`GEMINI_API_KEY`,
/// `OPENAI_API_KEY`), then `API_KEY`. Empty values count as unset.
pub fn resolve_api_key<F>(provider: LlmProvider, api_key: Option<String>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    api_key
        .or_else(|| provider.api_key_env().and_then(&lookup))
        .or_else(|| lookup(GENERIC_API_KEY_ENV))
        .filter(|key| !key.trim().is_empty())
}

/// Creates an LLM client from the configuration.
///
/// A missing API key is a configuration error. Model selection falls back
/// to the provider's default when the config leaves it unset.
pub fn create_client(config: &LlmConfig, api_key: Option<String>) -> Result<Box<dyn LlmClient>> {
    let provider: LlmProvider = config.provider.parse().map_err(IntelliSqlError::config)?;
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| provider.default_model().to_string());

    if provider == LlmProvider::Mock {
        return Ok(Box::new(MockLlmClient::new()));
    }

    let key = resolve_api_key(provider, api_key, |name| std::env::var(name).ok()).ok_or_else(
        || {
            IntelliSqlError::config(format!(
                "API key not found. Set {} or {} (a .env file in the working directory is read at startup).",
                provider.api_key_env().unwrap_or(GENERIC_API_KEY_ENV),
                GENERIC_API_KEY_ENV
            ))
        },
    )?;

    match provider {
        LlmProvider::Gemini => {
            let mut gemini = GeminiConfig::new(key, model);
            if let Some(secs) = config.timeout_secs {
                gemini = gemini.with_timeout(secs);
            }
            Ok(Box::new(GeminiClient::new(gemini)?))
        }
        LlmProvider::OpenAi => {
            let mut openai = OpenAiConfig::new(key, model);
            if let Some(secs) = config.timeout_secs {
                openai = openai.with_timeout(secs);
            }
            Ok(Box::new(OpenAiClient::new(openai)?))
        }
        LlmProvider::Mock => Ok(Box::new(MockLlmClient::new())),
    }
}
