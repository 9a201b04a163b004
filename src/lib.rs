//! IntelliSQL - Ask questions about a SQLite database in plain English.
//!
//! This library exposes the core modules for use by the binary and in
//! integration tests.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod logging;
pub mod output;
pub mod pipeline;
