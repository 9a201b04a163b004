//! Question-to-result pipeline.
//!
//! Wires the translator to the database executor. The generated SQL is
//! handed to the database exactly as the model returned it.

use tracing::{debug, info};

use crate::db::{DatabaseClient, QueryResult};
use crate::error::Result;
use crate::llm::Translator;

/// A translated question together with the rows it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    /// SQL returned by the model, verbatim.
    pub sql: String,
    /// Rows and column names from running `sql`.
    pub result: QueryResult,
}

/// Outcome of a single request.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// The question was translated and executed.
    Answered(Answer),
    /// The question was empty or whitespace; nothing was called.
    EmptyQuestion,
}

/// Translate-then-execute pipeline.
///
/// Holds no per-request state, so `answer` can be called any number of times.
pub struct Pipeline {
    translator: Translator,
    db: Box<dyn DatabaseClient>,
}

impl Pipeline {
    /// Creates a pipeline from a translator and a database client.
    pub fn new(translator: Translator, db: Box<dyn DatabaseClient>) -> Self {
        Self { translator, db }
    }

    /// Answers a natural-language question.
    ///
    /// A translation failure stops the request before the database is touched.
    /// Execution errors are returned as-is; nothing is retried.
    pub async fn answer(&self, question: &str) -> Result<AnswerOutcome> {
        if question.trim().is_empty() {
            debug!("Empty question, skipping translation");
            return Ok(AnswerOutcome::EmptyQuestion);
        }

        let sql = self.translator.translate(question).await?;
        let result = self.db.execute_query(&sql).await?;

        info!(
            rows = result.row_count,
            elapsed_ms = result.execution_time.as_millis() as u64,
            "Question answered"
        );

        Ok(AnswerOutcome::Answered(Answer { sql, result }))
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("translator", &self.translator)
            .finish_non_exhaustive()
    }
}
