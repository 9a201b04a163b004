//! Mock LLM clients for testing.
//!
//! Provide deterministic responses based on input patterns and count how
//! often they are called.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{IntelliSqlError, Result};
use crate::llm::types::{Message, Role};
use crate::llm::LlmClient;

/// Mock LLM client that returns canned SQL for the STUDENTS table.
///
/// Clones share the call counter, so a test can keep one handle and box the other.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    /// Custom response mappings (pattern -> response).
    custom_responses: Vec<(String, String)>,
    calls: Arc<AtomicUsize>,
}

impl MockLlmClient {
    /// Creates a new mock client with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom response mapping.
    ///
    /// When the question contains `pattern` (case-insensitive), the mock
    /// returns `response`. Custom mappings are checked before the defaults.
    pub fn with_response(
        mut self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.custom_responses
            .push((pattern.into(), response.into()));
        self
    }

    /// Returns how many completions have been requested.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Generates a mock response based on the question.
    fn mock_response(&self, input: &str) -> String {
        let input_lower = input.to_lowercase();

        for (pattern, response) in &self.custom_responses {
            if input_lower.contains(&pattern.to_lowercase()) {
                return response.clone();
            }
        }

        if input_lower.contains("how many") || input_lower.contains("count") {
            return "SELECT COUNT(*) FROM STUDENTS;".to_string();
        }

        if input_lower.contains("mcom") {
            return "SELECT * FROM STUDENTS WHERE CLASS='MCom';".to_string();
        }

        if input_lower.contains("highest") || input_lower.contains("top") {
            return "SELECT * FROM STUDENTS ORDER BY MARKS DESC LIMIT 1;".to_string();
        }

        if input_lower.contains("average") {
            return "SELECT AVG(MARKS) FROM STUDENTS;".to_string();
        }

        if input_lower.contains("all students") || input_lower.contains("list") {
            return "SELECT * FROM STUDENTS;".to_string();
        }

        "I don't understand that question. Could you please rephrase it?".to_string()
    }

    /// Extracts the last user message content from a message list.
    fn extract_user_input(messages: &[Message]) -> String {
        messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let input = Self::extract_user_input(messages);
        Ok(self.mock_response(&input))
    }
}

/// LLM client that fails every request, as an unreachable or over-quota service would.
#[derive(Debug, Clone)]
pub struct FailingLlmClient {
    message: String,
    calls: Arc<AtomicUsize>,
}

impl FailingLlmClient {
    /// Creates a client that fails with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Arc::default(),
        }
    }

    /// Returns how many completions have been requested.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for FailingLlmClient {
    async fn complete(&self, _messages: &[Message]) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(IntelliSqlError::llm(self.message.clone()))
    }
}
