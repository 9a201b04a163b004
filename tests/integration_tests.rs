//! Integration tests for IntelliSQL.
//!
//! These tests run against throwaway SQLite files and the mock LLM client,
//! so they need neither network access nor an API key.
//!
//! Run with: `cargo test --test integration_tests`

mod integration;
