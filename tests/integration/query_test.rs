//! Query execution integration tests.
//!
//! Runs statements against a seeded STUDENTS table.

use intellisql::db::{DatabaseClient, SqliteClient, Value};
use intellisql::error::IntelliSqlError;
use pretty_assertions::assert_eq;

use super::seeded_database;

#[tokio::test]
async fn test_count_returns_five() {
    let (_dir, path) = seeded_database().await;
    let client = SqliteClient::new(&path);

    let result = client
        .execute_query("SELECT COUNT(*) FROM STUDENTS;")
        .await
        .unwrap();

    assert_eq!(result.column_names(), vec!["COUNT(*)"]);
    assert_eq!(result.rows, vec![vec![Value::Int(5)]]);
}

#[tokio::test]
async fn test_rows_keep_engine_order() {
    let (_dir, path) = seeded_database().await;
    let client = SqliteClient::new(&path);

    let result = client
        .execute_query("SELECT NAME FROM STUDENTS ORDER BY MARKS DESC")
        .await
        .unwrap();

    let names: Vec<String> = result
        .rows
        .iter()
        .map(|row| row[0].to_display_string())
        .collect();
    assert_eq!(names, vec!["Dilsha", "Sibin", "Rijo", "Sijo", "Lijo"]);
}

#[tokio::test]
async fn test_no_match_still_reports_columns() {
    let (_dir, path) = seeded_database().await;
    let client = SqliteClient::new(&path);

    let result = client
        .execute_query("SELECT NAME, MARKS FROM STUDENTS WHERE MARKS > 100")
        .await
        .unwrap();

    assert_eq!(result.column_names(), vec!["NAME", "MARKS"]);
    assert!(result.is_empty());
    assert_eq!(result.row_count, 0);
}

#[tokio::test]
async fn test_update_is_committed() {
    let (_dir, path) = seeded_database().await;
    let client = SqliteClient::new(&path);

    let result = client
        .execute_query("UPDATE STUDENTS SET MARKS = 80 WHERE NAME = 'Lijo'")
        .await
        .unwrap();
    assert!(result.columns.is_empty());
    assert!(result.rows.is_empty());

    let check = client
        .execute_query("SELECT MARKS FROM STUDENTS WHERE NAME = 'Lijo'")
        .await
        .unwrap();
    assert_eq!(check.rows, vec![vec![Value::Int(80)]]);
}

#[tokio::test]
async fn test_unknown_column_is_query_error() {
    let (_dir, path) = seeded_database().await;
    let client = SqliteClient::new(&path);

    let err = client
        .execute_query("SELECT GRADE FROM STUDENTS")
        .await
        .unwrap_err();

    assert!(matches!(err, IntelliSqlError::Query(_)));
    assert!(err.to_string().contains("GRADE"));
}

#[tokio::test]
async fn test_fenced_output_is_rejected_by_engine() {
    let (_dir, path) = seeded_database().await;
    let client = SqliteClient::new(&path);

    let err = client
        .execute_query("```sql\nSELECT * FROM STUDENTS;\n```")
        .await
        .unwrap_err();

    assert!(matches!(err, IntelliSqlError::Query(_)));
}

#[tokio::test]
async fn test_missing_database_is_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.db");
    let client = SqliteClient::new(&path);

    let err = client.execute_query("SELECT 1").await.unwrap_err();

    assert!(matches!(err, IntelliSqlError::Connection(_)));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_multiple_statements_rejected_without_running() {
    let (_dir, path) = seeded_database().await;
    let client = SqliteClient::new(&path);

    let err = client
        .execute_query(
            "SELECT COUNT(*) FROM STUDENTS; DELETE FROM STUDENTS; SELECT NAME, MARKS FROM STUDENTS LIMIT 0;",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, IntelliSqlError::Query(_)));
    assert!(err.to_string().contains("one statement at a time"));

    let count = client
        .execute_query("SELECT COUNT(*) FROM STUDENTS")
        .await
        .unwrap();
    assert_eq!(count.rows, vec![vec![Value::Int(5)]]);
}

#[tokio::test]
async fn test_second_select_is_rejected() {
    let (_dir, path) = seeded_database().await;
    let client = SqliteClient::new(&path);

    let err = client
        .execute_query("SELECT NAME FROM STUDENTS; SELECT 1, 2;")
        .await
        .unwrap_err();

    assert!(matches!(err, IntelliSqlError::Query(_)));
}

#[tokio::test]
async fn test_vacuum_succeeds() {
    let (_dir, path) = seeded_database().await;
    let client = SqliteClient::new(&path);

    let result = client.execute_query("VACUUM").await.unwrap();

    assert!(result.columns.is_empty());
    assert!(result.rows.is_empty());
}
