//! Prompt construction for LLM requests.
//!
//! Builds the fixed schema context sent ahead of every question.

use crate::db::STUDENTS_TABLE;
use crate::llm::types::Message;

/// Context template; `{schema}` is replaced with the table description.
const CONTEXT_TEMPLATE: &str = r#"You are an expert in converting English questions to SQL query!
{schema}

For example,
Example 1 - How many entries of records are present?, the SQL command will be something like this: SELECT COUNT(*) FROM STUDENTS;
Example 2 - Tell me all the students studying in MCom class?, the SQL command will be something like this: SELECT * FROM STUDENTS WHERE CLASS='MCom';
also the sql code should not have ``` in beginning or end and sql word in output"#;

/// Returns the schema context for the STUDENTS table.
pub fn schema_context() -> String {
    CONTEXT_TEMPLATE.replace("{schema}", &STUDENTS_TABLE.format_for_llm())
}

/// Builds the message list for one translation: context first, then the question.
pub fn build_messages(context: &str, question: &str) -> Vec<Message> {
    vec![Message::system(context), Message::user(question)]
}
