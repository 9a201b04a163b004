//! Integration tests for IntelliSQL.

pub mod pipeline_test;
pub mod query_test;
pub mod seed_test;

use intellisql::db::seed;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory holding a freshly seeded `data.db`.
pub async fn seeded_database() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.db");
    seed::reset_students(&path).await.unwrap();
    (dir, path)
}
