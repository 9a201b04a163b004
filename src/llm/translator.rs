//! Natural language to SQL translation.
//!
//! The `Translator` owns an LLM client and the schema context. It sends the
//! context followed by the question and hands back whatever text the model
//! produced. The output is not parsed, stripped or validated.

use std::time::Instant;
use tracing::debug;

use crate::error::Result;
use crate::llm::{build_messages, schema_context, LlmClient};

/// Translates questions into SQL using a hosted model.
pub struct Translator {
    client: Box<dyn LlmClient>,
    context: String,
}

impl Translator {
    /// Creates a translator using the STUDENTS schema context.
    pub fn new(client: Box<dyn LlmClient>) -> Self {
        Self::with_context(client, schema_context())
    }

    /// Creates a translator with a custom context.
    pub fn with_context(client: Box<dyn LlmClient>, context: impl Into<String>) -> Self {
        Self {
            client,
            context: context.into(),
        }
    }

    /// Returns the context sent ahead of every question.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Translates `question` into a SQL string.
    ///
    /// One request per call. Client errors are returned unchanged.
    pub async fn translate(&self, question: &str) -> Result<String> {
        let messages = build_messages(&self.context, question);

        let start = Instant::now();
        let sql = self.client.complete(&messages).await?;

        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            sql = %sql,
            "Translated question"
        );

        Ok(sql)
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("context_len", &self.context.len())
            .finish_non_exhaustive()
    }
}
