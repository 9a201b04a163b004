//! Mock database clients for testing.
//!
//! Record what the pipeline hands to the database layer without touching a
//! real file.

use super::{ColumnInfo, DatabaseClient, QueryResult, Value};
use crate::error::{IntelliSqlError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A mock database client that records every statement and returns a canned result.
#[derive(Debug, Clone, Default)]
pub struct MockDatabaseClient {
    executed: Arc<Mutex<Vec<String>>>,
    result: Option<QueryResult>,
}

impl MockDatabaseClient {
    /// Creates a mock that echoes each statement back as a one-row result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that returns `result` for every statement.
    pub fn with_result(result: QueryResult) -> Self {
        Self {
            executed: Arc::default(),
            result: Some(result),
        }
    }

    /// Returns the statements executed so far, oldest first.
    pub fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .map(|sqls| sqls.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Returns how many statements have been executed.
    pub fn call_count(&self) -> usize {
        self.executed().len()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        match self.executed.lock() {
            Ok(mut sqls) => sqls.push(sql.to_string()),
            Err(poisoned) => poisoned.into_inner().push(sql.to_string()),
        }

        if let Some(result) = &self.result {
            return Ok(result.clone());
        }

        let columns = vec![ColumnInfo::new("result", "TEXT")];
        let rows = vec![vec![Value::String(format!("Mock result for: {}", sql))]];
        Ok(QueryResult::with_data(columns, rows).with_execution_time(Duration::from_millis(1)))
    }
}

/// A database client whose every statement fails with the engine's error.
#[derive(Debug, Clone)]
pub struct FailingDatabaseClient {
    message: String,
    calls: Arc<Mutex<usize>>,
}

impl FailingDatabaseClient {
    /// Creates a client that fails with the given engine message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Arc::default(),
        }
    }

    /// Returns how many statements were attempted.
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .map(|calls| *calls)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        match self.calls.lock() {
            Ok(mut calls) => *calls += 1,
            Err(poisoned) => *poisoned.into_inner() += 1,
        }
        Err(IntelliSqlError::query(self.message.clone()))
    }
}
