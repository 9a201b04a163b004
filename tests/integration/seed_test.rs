//! Sample data integration tests.

use intellisql::db::{seed, DatabaseClient, SqliteClient, Value, STUDENTS_TABLE};
use intellisql::llm::schema_context;
use pretty_assertions::assert_eq;

use super::seeded_database;

fn names(rows: &[Vec<Value>], index: usize) -> Vec<String> {
    rows.iter().map(|row| row[index].to_display_string()).collect()
}

#[tokio::test]
async fn test_seed_creates_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.db");

    let records = seed::reset_students(&path).await.unwrap();

    assert!(path.exists());
    assert_eq!(records.row_count, 5);
    assert_eq!(
        records.column_names(),
        vec!["NAME", "CLASS", "MARKS", "COMPANY"]
    );
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let (_dir, path) = seeded_database().await;

    seed::reset_students(&path).await.unwrap();
    let records = seed::reset_students(&path).await.unwrap();

    assert_eq!(records.row_count, 5);
    assert_eq!(
        names(&records.rows, 0),
        vec!["Sijo", "Lijo", "Rijo", "Sibin", "Dilsha"]
    );
}

#[tokio::test]
async fn test_seed_discards_local_changes() {
    let (_dir, path) = seeded_database().await;
    let client = SqliteClient::new(&path);
    client
        .execute_query("DELETE FROM STUDENTS WHERE NAME = 'Sijo'")
        .await
        .unwrap();

    let records = seed::reset_students(&path).await.unwrap();

    assert_eq!(records.row_count, 5);
}

#[tokio::test]
async fn test_context_matches_table_columns() {
    let (_dir, path) = seeded_database().await;
    let client = SqliteClient::new(&path);

    let info = client
        .execute_query("SELECT name FROM pragma_table_info('STUDENTS') ORDER BY cid")
        .await
        .unwrap();
    let columns = names(&info.rows, 0);

    assert_eq!(columns, STUDENTS_TABLE.column_names());
    let context = schema_context();
    assert!(context.contains(&format!(
        "has the following columns - {}.",
        columns.join(", ")
    )));
}
