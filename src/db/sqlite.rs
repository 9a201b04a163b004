//! SQLite database client implementation.
//!
//! Provides the `SqliteClient` struct that implements the `DatabaseClient` trait
//! for a single-file SQLite database using sqlx. Every call opens its own
//! connection and closes it before returning; nothing is pooled.

use crate::db::{ColumnInfo, DatabaseClient, QueryResult, Row, Value};
use crate::error::{IntelliSqlError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column as SqlxColumn, Connection, Executor, Row as SqlxRow, Statement, TypeInfo, ValueRef};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How long a statement waits on a locked database file.
const BUSY_TIMEOUT_SECS: u64 = 5;

/// SQLite database client bound to one database file.
#[derive(Debug, Clone)]
pub struct SqliteClient {
    path: PathBuf,
}

impl SqliteClient {
    /// Creates a client for the database file at `path`.
    ///
    /// No connection is made until a statement is executed.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the database file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh connection to the database file.
    ///
    /// A missing file is reported as a connection error rather than silently
    /// creating an empty database.
    pub(crate) async fn open(path: &Path, create_if_missing: bool) -> Result<SqliteConnection> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(create_if_missing)
            .busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS));

        SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| map_connection_error(e, path))
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();
        let mut conn = Self::open(&self.path, false).await?;
        debug!(path = %self.path.display(), "Opened database connection");

        let outcome = run_statement(&mut conn, sql).await;

        if let Err(e) = conn.close().await {
            warn!("Failed to close database connection: {e}");
        }

        let (columns, rows) = outcome?;
        let execution_time = start.elapsed();
        debug!(
            row_count = rows.len(),
            column_count = columns.len(),
            duration_ms = execution_time.as_millis() as u64,
            "Statement executed"
        );

        Ok(QueryResult::with_data(columns, rows).with_execution_time(execution_time))
    }
}

/// Prepares and executes one statement in autocommit mode.
///
/// SQLite commits the statement on its own once it finishes, whatever its
/// kind, so `VACUUM` and other statements that refuse to run inside a
/// transaction work too. Column names come from the prepared statement, so a
/// SELECT that matches no rows still reports its columns. Statements without
/// a result set (INSERT, UPDATE, DDL) yield no columns and no rows.
async fn run_statement(
    conn: &mut SqliteConnection,
    sql: &str,
) -> Result<(Vec<ColumnInfo>, Vec<Row>)> {
    ensure_single_statement(sql)?;

    let statement = (&mut *conn)
        .prepare(sql)
        .await
        .map_err(|e| IntelliSqlError::query(format_query_error(e)))?;

    let columns: Vec<ColumnInfo> = statement
        .columns()
        .iter()
        .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
        .collect();

    let fetched: Vec<SqliteRow> = statement
        .query()
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| IntelliSqlError::query(format_query_error(e)))?;

    Ok((columns, fetched.iter().map(convert_row).collect()))
}

/// Rejects input holding more than one statement, before anything runs.
///
/// sqlx executes every statement in the string, and rows from later SELECTs
/// would land under the first statement's column names.
fn ensure_single_statement(sql: &str) -> Result<()> {
    let tail = &sql[first_statement_end(sql)..];
    if has_sql_content(tail) {
        return Err(IntelliSqlError::query(
            "You can only execute one statement at a time.",
        ));
    }
    Ok(())
}

/// Returns the byte offset just past the first statement's `;`, or the input
/// length when there is no terminator.
///
/// Quoted strings, quoted identifiers and comments are skipped. Inside a
/// `CREATE TRIGGER` body, `;` only ends the statement after the closing `END`.
fn first_statement_end(sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut i = 0;
    let mut word_index = 0;
    let mut first_word_is_create = false;
    let mut in_trigger = false;
    let mut block_depth = 0usize;
    let mut body_seen = false;

    while i < bytes.len() {
        if let Some(next) = skip_comment(bytes, i) {
            i = next;
            continue;
        }

        match bytes[i] {
            quote @ (b'\'' | b'"' | b'`') => i = skip_quoted(bytes, i + 1, quote),
            b'[' => i = skip_quoted(bytes, i + 1, b']'),
            b';' if !in_trigger || (body_seen && block_depth == 0) => return i + 1,
            c if c.is_ascii_alphanumeric() || c == b'_' => {
                let begin = i;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                let word = sql[begin..i].to_ascii_uppercase();

                if word_index == 0 {
                    first_word_is_create = word == "CREATE";
                } else if first_word_is_create && word_index <= 2 && word == "TRIGGER" {
                    in_trigger = true;
                }
                word_index += 1;

                if in_trigger {
                    match word.as_str() {
                        "BEGIN" => {
                            body_seen = true;
                            block_depth += 1;
                        }
                        "CASE" => block_depth += 1,
                        "END" => block_depth = block_depth.saturating_sub(1),
                        _ => {}
                    }
                }
            }
            _ => i += 1,
        }
    }

    bytes.len()
}

/// Returns true if `sql` holds anything besides whitespace, `;` and comments.
fn has_sql_content(sql: &str) -> bool {
    let bytes = sql.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if let Some(next) = skip_comment(bytes, i) {
            i = next;
        } else if bytes[i].is_ascii_whitespace() || bytes[i] == b';' {
            i += 1;
        } else {
            return true;
        }
    }

    false
}

/// If a comment starts at `i`, returns the offset just past it.
fn skip_comment(bytes: &[u8], i: usize) -> Option<usize> {
    match (bytes.get(i), bytes.get(i + 1)) {
        (Some(b'-'), Some(b'-')) => Some(
            bytes[i..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(bytes.len(), |end| i + end + 1),
        ),
        (Some(b'/'), Some(b'*')) => Some(
            bytes[i + 2..]
                .windows(2)
                .position(|w| w == b"*/")
                .map_or(bytes.len(), |end| i + 2 + end + 2),
        ),
        _ => None,
    }
}

/// Skips to just past the closing `quote`; doubled quotes are escapes.
fn skip_quoted(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() {
        if bytes[i] == quote {
            if quote != b']' && bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.columns().len())
        .map(|i| convert_value(row, i))
        .collect()
}

/// Converts a single column value using the value's storage class.
///
/// SQLite is dynamically typed, so the declared column type is ignored here;
/// `COUNT(*)` and `MARKS INT` both come back as INTEGER values.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let storage_class = match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_uppercase(),
        Err(_) => return Value::Null,
    };

    match storage_class.as_str() {
        "INTEGER" | "INT" | "BIGINT" | "BOOLEAN" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" | "FLOAT" | "DOUBLE" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

/// Maps sqlx connection errors to user-friendly messages.
fn map_connection_error(error: sqlx::Error, path: &Path) -> IntelliSqlError {
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("unable to open") || error_str.contains("no such file") {
        IntelliSqlError::connection(format!(
            "Cannot open database {}. Run with --seed to create it.",
            path.display()
        ))
    } else {
        IntelliSqlError::connection(format!(
            "Cannot open database {}: {error}",
            path.display()
        ))
    }
}

/// Formats a query error, preferring the engine's own message.
fn format_query_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn scratch_db(dir: &tempfile::TempDir) -> SqliteClient {
        let path = dir.path().join("scratch.db");
        let conn = SqliteClient::open(&path, true).await.unwrap();
        conn.close().await.unwrap();
        SqliteClient::new(path)
    }

    #[tokio::test]
    async fn test_select_literal_values() {
        let dir = tempdir().unwrap();
        let client = scratch_db(&dir).await;

        let result = client
            .execute_query("SELECT 1 AS num, 'hello' AS greeting, 2.5 AS ratio, NULL AS empty")
            .await
            .unwrap();

        assert_eq!(
            result.column_names(),
            vec!["num", "greeting", "ratio", "empty"]
        );
        assert_eq!(result.row_count, 1);
        assert_eq!(
            result.rows[0],
            vec![
                Value::Int(1),
                Value::from("hello"),
                Value::Float(2.5),
                Value::Null
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_select_still_reports_columns() {
        let dir = tempdir().unwrap();
        let client = scratch_db(&dir).await;

        client
            .execute_query("CREATE TABLE t (a INTEGER, b TEXT)")
            .await
            .unwrap();
        let result = client.execute_query("SELECT a, b FROM t").await.unwrap();

        assert!(result.is_empty());
        assert_eq!(result.column_names(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_mutating_statement_is_committed() {
        let dir = tempdir().unwrap();
        let client = scratch_db(&dir).await;

        client
            .execute_query("CREATE TABLE t (a INTEGER)")
            .await
            .unwrap();
        let insert = client
            .execute_query("INSERT INTO t VALUES (7)")
            .await
            .unwrap();
        assert!(insert.columns.is_empty());
        assert!(insert.rows.is_empty());

        // A new connection sees the committed row.
        let result = client.execute_query("SELECT a FROM t").await.unwrap();
        assert_eq!(result.rows, vec![vec![Value::Int(7)]]);
    }

    #[tokio::test]
    async fn test_vacuum_runs_outside_transaction() {
        let dir = tempdir().unwrap();
        let client = scratch_db(&dir).await;

        let result = client.execute_query("VACUUM").await.unwrap();
        assert!(result.columns.is_empty());
    }

    #[tokio::test]
    async fn test_create_trigger_is_one_statement() {
        let dir = tempdir().unwrap();
        let client = scratch_db(&dir).await;
        client
            .execute_query("CREATE TABLE t (a INTEGER)")
            .await
            .unwrap();
        client
            .execute_query("CREATE TABLE log (a INTEGER)")
            .await
            .unwrap();

        client
            .execute_query(
                "CREATE TRIGGER t_log AFTER INSERT ON t BEGIN INSERT INTO log VALUES (NEW.a); END;",
            )
            .await
            .unwrap();
        client
            .execute_query("INSERT INTO t VALUES (3)")
            .await
            .unwrap();

        let result = client.execute_query("SELECT a FROM log").await.unwrap();
        assert_eq!(result.rows, vec![vec![Value::Int(3)]]);
    }

    #[test]
    fn test_single_statement_accepted() {
        for sql in [
            "SELECT 1",
            "SELECT 1;",
            "SELECT 1;  \n ;",
            "SELECT 1; -- trailing comment",
            "SELECT 1; /* done */",
            "SELECT * FROM STUDENTS WHERE NAME = 'a;b'",
            "SELECT \"x;y\" FROM t",
            "SELECT [odd;name] FROM t",
            "SELECT 'it''s; fine'",
            "SELECT 1 -- comment; DELETE FROM t",
            "CREATE TEMP TRIGGER tr AFTER UPDATE ON t BEGIN SELECT CASE WHEN 1 THEN 1 END; DELETE FROM t; END;",
        ] {
            assert!(ensure_single_statement(sql).is_ok(), "rejected: {sql}");
        }
    }

    #[test]
    fn test_multiple_statements_rejected() {
        for sql in [
            "SELECT 1; SELECT 2",
            "SELECT COUNT(*) FROM STUDENTS; DELETE FROM STUDENTS;",
            "SELECT ';'; DROP TABLE t",
            "CREATE TRIGGER tr AFTER INSERT ON t BEGIN SELECT 1; END; DELETE FROM t",
        ] {
            let err = ensure_single_statement(sql).unwrap_err();
            assert!(matches!(err, IntelliSqlError::Query(_)), "accepted: {sql}");
        }
    }

    #[tokio::test]
    async fn test_malformed_sql_is_query_error() {
        let dir = tempdir().unwrap();
        let client = scratch_db(&dir).await;

        let err = client.execute_query("SELEC nonsense").await.unwrap_err();
        assert!(matches!(err, IntelliSqlError::Query(_)));
    }

    #[tokio::test]
    async fn test_missing_database_is_connection_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let client = SqliteClient::new(&path);

        let err = client.execute_query("SELECT 1").await.unwrap_err();
        assert!(matches!(err, IntelliSqlError::Connection(_)));
        assert!(!path.exists());
    }
}
