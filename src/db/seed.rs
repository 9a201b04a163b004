//! Sample data for the STUDENTS table.
//!
//! Resetting is drop-then-recreate-then-insert inside one transaction, so it
//! can be run any number of times and always leaves the same five rows.

use crate::db::{DatabaseClient, QueryResult, SqliteClient, STUDENTS_TABLE};
use crate::error::{IntelliSqlError, Result};
use sqlx::Connection;
use std::path::Path;
use tracing::{info, warn};

/// A row of sample data: (NAME, CLASS, MARKS, COMPANY).
pub type StudentRecord = (&'static str, &'static str, i64, &'static str);

/// The records inserted by [`reset_students`].
pub const SAMPLE_STUDENTS: [StudentRecord; 5] = [
    ("Sijo", "BTech", 75, "JSW"),
    ("Lijo", "MTech", 69, "TCS"),
    ("Rijo", "BSc", 79, "WIPRO"),
    ("Sibin", "MSc", 89, "INFOSYS"),
    ("Dilsha", "MCom", 99, "Cyient"),
];

/// Recreates the STUDENTS table at `path` and fills it with the sample records.
///
/// Creates the database file if it does not exist yet. Returns the table
/// contents as read back after the commit.
pub async fn reset_students(path: &Path) -> Result<QueryResult> {
    let mut conn = SqliteClient::open(path, true).await?;

    let outcome = write_sample_data(&mut conn).await;
    if let Err(e) = conn.close().await {
        warn!("Failed to close database connection: {e}");
    }
    outcome?;

    info!(
        path = %path.display(),
        rows = SAMPLE_STUDENTS.len(),
        "Reset {} table",
        STUDENTS_TABLE.name
    );

    SqliteClient::new(path)
        .execute_query(&format!("SELECT * FROM {}", STUDENTS_TABLE.name))
        .await
}

async fn write_sample_data(conn: &mut sqlx::SqliteConnection) -> Result<()> {
    let mut tx = conn.begin().await.map_err(seed_error)?;

    sqlx::query(&STUDENTS_TABLE.drop_table_sql())
        .execute(&mut *tx)
        .await
        .map_err(seed_error)?;

    sqlx::query(&STUDENTS_TABLE.create_table_sql())
        .execute(&mut *tx)
        .await
        .map_err(seed_error)?;

    let insert = STUDENTS_TABLE.insert_sql();
    for (name, class, marks, company) in SAMPLE_STUDENTS {
        sqlx::query(&insert)
            .bind(name)
            .bind(class)
            .bind(marks)
            .bind(company)
            .execute(&mut *tx)
            .await
            .map_err(seed_error)?;
    }

    tx.commit().await.map_err(seed_error)
}

fn seed_error(e: sqlx::Error) -> IntelliSqlError {
    IntelliSqlError::query(format!("Failed to seed {}: {e}", STUDENTS_TABLE.name))
}
