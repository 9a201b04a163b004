//! Database layer for IntelliSQL.
//!
//! Provides a trait-based interface for running SQL against the local store,
//! so the pipeline can be exercised against test doubles.

mod mock;
mod schema;
pub mod seed;
mod sqlite;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use schema::{Column, TableSchema, STUDENTS_TABLE};
pub use sqlite::SqliteClient;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the interface for database clients.
///
/// The SQL handed to `execute_query` is trusted verbatim: no parsing,
/// classification or sanitization happens at this boundary.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a SQL statement once and returns all rows with column names.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;
}
