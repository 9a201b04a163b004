//! End-to-end pipeline tests.
//!
//! Questions go through the mock LLM client and run against a seeded file.

use intellisql::app::{App, Reply};
use intellisql::db::{SqliteClient, Value};
use intellisql::llm::{MockLlmClient, Translator};
use intellisql::output::OutputFormat;
use intellisql::pipeline::{AnswerOutcome, Pipeline};
use pretty_assertions::assert_eq;
use std::path::Path;

use super::seeded_database;

fn pipeline(llm: MockLlmClient, path: &Path) -> Pipeline {
    Pipeline::new(Translator::new(Box::new(llm)), Box::new(SqliteClient::new(path)))
}

async fn answered(pipeline: &Pipeline, question: &str) -> (String, Vec<Vec<Value>>) {
    match pipeline.answer(question).await.unwrap() {
        AnswerOutcome::Answered(answer) => (answer.sql, answer.result.rows),
        AnswerOutcome::EmptyQuestion => panic!("Expected an answer for {:?}", question),
    }
}

#[tokio::test]
async fn test_count_question() {
    let (_dir, path) = seeded_database().await;
    let pipeline = pipeline(MockLlmClient::new(), &path);

    let (sql, rows) = answered(&pipeline, "How many entries of records are present?").await;

    assert_eq!(sql, "SELECT COUNT(*) FROM STUDENTS;");
    assert_eq!(rows, vec![vec![Value::Int(5)]]);
}

#[tokio::test]
async fn test_mcom_question_returns_single_student() {
    let (_dir, path) = seeded_database().await;
    let pipeline = pipeline(MockLlmClient::new(), &path);

    let (_, rows) = answered(&pipeline, "Tell me all students in MCom class").await;

    assert_eq!(
        rows,
        vec![vec![
            Value::from("Dilsha"),
            Value::from("MCom"),
            Value::Int(99),
            Value::from("Cyient"),
        ]]
    );
}

#[tokio::test]
async fn test_answers_do_not_depend_on_earlier_requests() {
    let (_dir, path) = seeded_database().await;
    let pipeline = pipeline(MockLlmClient::new(), &path);

    let first = answered(&pipeline, "Who has the highest marks?").await;
    answered(&pipeline, "How many entries of records are present?").await;
    let again = answered(&pipeline, "Who has the highest marks?").await;

    assert_eq!(first, again);
}

#[tokio::test]
async fn test_shell_reports_bad_sql_and_keeps_going() {
    let (_dir, path) = seeded_database().await;
    let llm = MockLlmClient::new().with_response("grade", "SELECT GRADE FROM STUDENTS;");
    let app = App::new(Ok(pipeline(llm, &path)), OutputFormat::Text);

    let failure = app.respond("Show every grade").await;
    assert!(failure.is_failure());
    assert!(failure.text().starts_with("An error occurred: "));

    let reply = app.respond("How many entries of records are present?").await;
    assert!(matches!(reply, Reply::Output(_)));
    assert!(reply.text().contains("(1 row)"));
}

#[tokio::test]
async fn test_shell_json_output() {
    let (_dir, path) = seeded_database().await;
    let app = App::new(Ok(pipeline(MockLlmClient::new(), &path)), OutputFormat::Json);

    let reply = app.respond("Tell me all students in MCom class").await;
    let json: serde_json::Value = serde_json::from_str(reply.text()).unwrap();

    assert_eq!(json["sql"], "SELECT * FROM STUDENTS WHERE CLASS='MCom';");
    assert_eq!(json["row_count"], 1);
    assert_eq!(json["rows"][0][0], "Dilsha");
}
