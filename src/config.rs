//! Configuration management for IntelliSQL.
//!
//! Handles loading configuration from a TOML file, with the LLM provider
//! settings and the path of the SQLite database that questions run against.
//! API keys are never read from the file; they come from the environment
//! (optionally populated from a `.env` file at startup).

use crate::error::{IntelliSqlError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure for IntelliSQL.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// LLM provider configuration.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Local database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// LLM provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// LLM provider: "gemini", "openai" or "mock".
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model name. Each provider has its own default when unset.
    #[serde(default)]
    pub model: Option<String>,

    /// Request timeout in seconds. Requests wait indefinitely when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_provider() -> String {
    "gemini".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            timeout_secs: None,
        }
    }
}

/// Local database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file holding the STUDENTS table.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data.db")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("intellisql")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| IntelliSqlError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            IntelliSqlError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
